use crate::crawler::crawl_error::CrawlError;
use crate::crawler::crawl_summary::CrawlOutcome;
use crate::crawler::crawl_target::CrawlTarget;
use crate::crawler::crawler_config::CrawlerConfig;
use crate::crawler::page::PageCrawler;
use crate::robots::RobotsPolicyChecker;
use tracing::{info, warn};

/// Crawls a single target, consulting robots.txt before the page is requested.
#[derive(Debug, Clone)]
pub struct TargetCrawler {
    robots_checker: RobotsPolicyChecker,
    page_crawler: PageCrawler,
    check_robots: bool,
}

impl TargetCrawler {
    pub fn new(client: reqwest::Client, config: &CrawlerConfig) -> Self {
        Self {
            robots_checker: RobotsPolicyChecker::new(client.clone())
                .with_timeout(config.robots_timeout()),
            page_crawler: PageCrawler::new(client, config.page_timeout()),
            check_robots: config.check_robots(),
        }
    }

    pub async fn crawl(&self, target: &CrawlTarget) -> Result<CrawlOutcome, CrawlError> {
        if self.check_robots {
            let decision = self
                .robots_checker
                .clone()
                .with_policy(target.relevance_policy)
                .check(&target.origin(), target.path())
                .await?;
            if let Some(rule) = decision.matched_rule {
                info!(target_name = %target.name, %rule, "Skipping target, robots.txt disallows crawling");
                return Ok(CrawlOutcome::DeniedByRobotsTxt { rule });
            }
        }

        info!(target_name = %target.name, url = %target.url, "Crawling");
        match self.page_crawler.crawl(&target.url).await {
            Ok(page_summary) => Ok(CrawlOutcome::Fetched(page_summary)),
            Err(CrawlError::HttpError(status_code)) => {
                warn!(target_name = %target.name, status_code, "Page returned an HTTP error");
                Ok(CrawlOutcome::HttpError(status_code))
            }
            Err(e) => {
                warn!(target_name = %target.name, error = %e, "Page crawl failed");
                Ok(CrawlOutcome::Failed(e.to_string()))
            }
        }
    }
}
