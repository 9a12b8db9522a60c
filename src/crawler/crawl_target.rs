use crate::robots::AgentRelevancePolicy;
use serde::Deserialize;
use url::Url;

/// One source to crawl: where it lives and which robots.txt groups apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrawlTarget {
    pub name: String,
    pub url: Url,
    #[serde(default)]
    pub relevance_policy: AgentRelevancePolicy,
}

impl CrawlTarget {
    pub fn new(name: &str, url: Url, relevance_policy: AgentRelevancePolicy) -> Self {
        Self {
            name: name.to_owned(),
            url,
            relevance_policy,
        }
    }

    /// Uses the host as the target name.
    pub fn from_url(url: Url, relevance_policy: AgentRelevancePolicy) -> Self {
        let name = url.host_str().unwrap_or(url.as_str()).to_owned();
        Self {
            name,
            url,
            relevance_policy,
        }
    }

    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }
}
