use crate::crawler::page_summary::PageSummary;
use std::fmt;

/// What happened to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    Fetched(PageSummary),
    DeniedByRobotsTxt { rule: String },
    HttpError(u16),
    Failed(String),
    Cancelled,
}

impl CrawlOutcome {
    pub fn is_denied(&self) -> bool {
        matches!(self, CrawlOutcome::DeniedByRobotsTxt { .. })
    }
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlOutcome::Fetched(page) => write!(
                f,
                "{}, {}, {}, {}, {}",
                page.url, page.status_code, page.content_type, page.title, page.num_links
            ),
            CrawlOutcome::DeniedByRobotsTxt { rule } => {
                write!(f, "skipped, robots.txt disallows (rule: {rule})")
            }
            CrawlOutcome::HttpError(status_code) => write!(f, "HTTP error {status_code}"),
            CrawlOutcome::Failed(message) => write!(f, "failed: {message}"),
            CrawlOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    outcomes: Vec<(String, CrawlOutcome)>,
}

impl CrawlSummary {
    pub fn new(outcomes: Vec<(String, CrawlOutcome)>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[(String, CrawlOutcome)] {
        &self.outcomes
    }

    pub fn outcome(&self, target_name: &str) -> Option<&CrawlOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == target_name)
            .map(|(_, outcome)| outcome)
    }

    pub fn add_outcome(&mut self, target_name: &str, outcome: CrawlOutcome) {
        self.outcomes.push((target_name.to_owned(), outcome));
    }

    pub fn num_fetched(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, CrawlOutcome::Fetched(_)))
            .count()
    }

    pub fn num_denied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_denied())
            .count()
    }
}
