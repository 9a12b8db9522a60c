use rand::Rng;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("rusty-gate/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    user_agent: String,
    check_robots: bool,
    robots_timeout_ms: u64,
    page_timeout_ms: u64,
    max_concurrent: usize,
    requests_per_second: Option<f64>,
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl CrawlerConfig {
    pub fn new(
        check_robots: bool,
        max_concurrent: usize,
        requests_per_second: Option<f64>,
    ) -> Self {
        Self {
            check_robots,
            max_concurrent,
            requests_per_second,
            ..Self::default()
        }
    }

    pub fn with_check_robots(mut self, check_robots: bool) -> Self {
        self.check_robots = check_robots;
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub fn with_requests_per_second(mut self, requests_per_second: Option<f64>) -> Self {
        self.requests_per_second = requests_per_second;
        self
    }

    /// Random pause in `[min, max]` after each page fetch; overrides the request rate.
    pub fn with_delay_range(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay_ms = min.as_millis() as u64;
        self.max_delay_ms = max.as_millis() as u64;
        self
    }

    pub fn with_robots_timeout(mut self, timeout: Duration) -> Self {
        self.robots_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_owned();
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn check_robots(&self) -> bool {
        self.check_robots
    }

    pub fn robots_timeout(&self) -> Duration {
        Duration::from_millis(self.robots_timeout_ms)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent.max(1)
    }

    pub fn requests_per_second(&self) -> Option<f64> {
        self.requests_per_second
    }

    /// Pause after each page fetch: jittered when a delay range is set, otherwise derived from the request rate.
    pub fn crawl_delay(&self) -> Option<Duration> {
        if self.max_delay_ms > 0 {
            let min_ms = self.min_delay_ms.min(self.max_delay_ms);
            let ms = rand::thread_rng().gen_range(min_ms..=self.max_delay_ms);
            return Some(Duration::from_millis(ms));
        }
        self.requests_per_second
            .filter(|rate| *rate > 0.0)
            .map(|rate| Duration::from_millis((1000.0 / rate) as u64))
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            check_robots: true,
            robots_timeout_ms: 5000,
            page_timeout_ms: 30000,
            max_concurrent: 1,
            requests_per_second: None,
            min_delay_ms: 0,
            max_delay_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crawl_delay_follows_rate() {
        let config = CrawlerConfig::new(true, 1, Some(0.5));
        assert_eq!(config.crawl_delay(), Some(Duration::from_millis(2000)));
        assert_eq!(CrawlerConfig::new(true, 1, Some(0.0)).crawl_delay(), None);
        assert_eq!(CrawlerConfig::default().crawl_delay(), None);
    }

    #[test]
    fn delay_range_is_jittered_within_bounds() {
        let config = CrawlerConfig::new(true, 1, Some(0.5))
            .with_delay_range(Duration::from_millis(5000), Duration::from_millis(8000));
        for _ in 0..50 {
            let delay = config.crawl_delay().unwrap();
            assert!(delay >= Duration::from_millis(5000));
            assert!(delay <= Duration::from_millis(8000));
        }
    }

    #[test]
    fn inverted_delay_range_uses_max() {
        let config = CrawlerConfig::default()
            .with_delay_range(Duration::from_millis(900), Duration::from_millis(300));
        assert_eq!(config.crawl_delay(), Some(Duration::from_millis(300)));
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        assert_eq!(CrawlerConfig::new(true, 0, None).max_concurrent(), 1);
    }
}
