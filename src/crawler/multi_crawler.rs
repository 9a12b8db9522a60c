use crate::crawler::crawl_plan::CrawlPlan;
use crate::crawler::crawl_summary::{CrawlOutcome, CrawlSummary};
use crate::crawler::target_crawler::TargetCrawler;
use futures::future::join_all;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::select;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Runs every target of a plan, at most `max_concurrent` at a time.
pub struct MultiCrawler {
    shutdown_notify: Arc<tokio::sync::Notify>,
    plan: CrawlPlan,
}

impl MultiCrawler {
    pub fn new(shutdown_notify: Arc<tokio::sync::Notify>, plan: CrawlPlan) -> Self {
        Self {
            shutdown_notify,
            plan,
        }
    }

    pub async fn run(self) -> anyhow::Result<CrawlSummary> {
        let config = self.plan.config().clone();
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .build()?;
        let target_crawler = TargetCrawler::new(client, &config);
        let crawl_delay = config.crawl_delay();
        let permits = Arc::new(Semaphore::new(config.max_concurrent()));

        let shutdown_requested = Arc::new(AtomicBool::new(false));
        {
            let shutdown_notify = Arc::clone(&self.shutdown_notify);
            let shutdown_requested = Arc::clone(&shutdown_requested);
            tokio::task::spawn(async move {
                shutdown_notify.notified().await;
                shutdown_requested.store(true, Ordering::Relaxed);
            });
        }

        info!(
            num_targets = self.plan.targets().len(),
            max_concurrent = config.max_concurrent(),
            "Starting crawl"
        );

        let handles = self
            .plan
            .targets()
            .iter()
            .cloned()
            .map(|target| {
                let target_crawler = target_crawler.clone();
                let permits = Arc::clone(&permits);
                let shutdown_notify = Arc::clone(&self.shutdown_notify);
                let shutdown_requested = Arc::clone(&shutdown_requested);
                tokio::task::spawn(async move {
                    let _permit = permits.acquire_owned().await?;
                    if shutdown_requested.load(Ordering::Relaxed) {
                        return Ok(CrawlOutcome::Cancelled);
                    }
                    let outcome = select! {
                        outcome = target_crawler.crawl(&target) => outcome?,
                        _ = shutdown_notify.notified() => CrawlOutcome::Cancelled,
                    };
                    if let Some(crawl_delay) = crawl_delay {
                        if matches!(outcome, CrawlOutcome::Fetched(_)) {
                            tokio::time::sleep(crawl_delay).await;
                        }
                    }
                    Ok::<CrawlOutcome, anyhow::Error>(outcome)
                })
            })
            .collect::<Vec<JoinHandle<anyhow::Result<CrawlOutcome>>>>();

        let all_tasks = join_all(handles).await;
        let mut crawl_summary = CrawlSummary::default();
        for (target, task_result) in self.plan.targets().iter().zip(all_tasks) {
            let outcome = match task_result {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => {
                    error!(target_name = %target.name, error = %e, "Target crawl aborted");
                    CrawlOutcome::Failed(e.to_string())
                }
                Err(e) => {
                    error!(target_name = %target.name, error = %e, "Crawl task panicked");
                    CrawlOutcome::Failed(e.to_string())
                }
            };
            crawl_summary.add_outcome(&target.name, outcome);
        }

        info!(
            fetched = crawl_summary.num_fetched(),
            denied = crawl_summary.num_denied(),
            "Crawl finished"
        );
        Ok(crawl_summary)
    }
}
