mod crawl_error;
mod crawl_plan;
mod crawl_summary;
mod crawl_target;
mod crawler_config;
mod multi_crawler;
mod page;
mod page_summary;
mod target_crawler;

pub use crawl_error::CrawlError;
pub use crawl_plan::{ConfigError, CrawlPlan};
pub use crawl_summary::{CrawlOutcome, CrawlSummary};
pub use crawl_target::CrawlTarget;
pub use crawler_config::{CrawlerConfig, DEFAULT_USER_AGENT};
pub use multi_crawler::MultiCrawler;
pub use page::PageCrawler;
pub use page_summary::PageSummary;
pub use target_crawler::TargetCrawler;
