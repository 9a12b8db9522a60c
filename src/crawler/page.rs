mod page_crawler;

pub use page_crawler::PageCrawler;
