use crate::robots::access_decision::AccessDecision;
use crate::robots::agent_relevance_policy::AgentRelevancePolicy;
use crate::robots::robots_error::RobotsError;
use crate::robots::robots_rule_set::RobotsRuleSet;
use crate::robots::robots_txt_source::RobotsTxtSource;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

pub const DEFAULT_ROBOTS_TIMEOUT: Duration = Duration::from_millis(5000);

/// Decides whether a path may be fetched, based on a freshly fetched robots.txt.
///
/// Every call performs one fetch and keeps nothing between calls. When the
/// robots.txt cannot be fetched the checker fails open and allows the path.
#[derive(Debug, Clone)]
pub struct RobotsPolicyChecker {
    client: reqwest::Client,
    policy: AgentRelevancePolicy,
    timeout: Duration,
}

impl RobotsPolicyChecker {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            policy: AgentRelevancePolicy::default(),
            timeout: DEFAULT_ROBOTS_TIMEOUT,
        }
    }

    pub fn with_policy(mut self, policy: AgentRelevancePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn is_allowed(&self, base_url: &str, target_path: &str) -> Result<bool, RobotsError> {
        Ok(self.check(base_url, target_path).await?.allowed)
    }

    pub async fn is_root_allowed(&self, base_url: &str) -> Result<bool, RobotsError> {
        self.is_allowed(base_url, "/").await
    }

    /// Only an invalid `base_url` is returned as an error.
    pub async fn check(
        &self,
        base_url: &str,
        target_path: &str,
    ) -> Result<AccessDecision, RobotsError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RobotsError::InvalidBaseUrl(base_url.to_owned(), e))?;
        let robots_txt_url = RobotsTxtSource::robots_txt_url(&base_url)?;
        let origin = base_url.origin().ascii_serialization();

        let robots_txt_source =
            match RobotsTxtSource::load_from_url(&self.client, &base_url, self.timeout).await {
                Ok(robots_txt_source) => robots_txt_source,
                Err(e) => {
                    warn!(
                        %origin,
                        path = target_path,
                        robots_txt = %robots_txt_url,
                        error = %e,
                        "Unable to fetch robots.txt, allowing path and continuing crawl"
                    );
                    return Ok(AccessDecision::allow());
                }
            };

        let rule_set = RobotsRuleSet::parse(robots_txt_source.origin(), robots_txt_source.content());
        let decision = rule_set.evaluate(target_path, self.policy);
        match decision.matched_rule.as_deref() {
            Some("/") => {
                warn!(%origin, path = target_path, rule = "/", "robots.txt disallows all crawling");
            }
            Some(rule) => {
                warn!(%origin, path = target_path, rule, "Path disallowed by robots.txt");
            }
            None => {
                info!(%origin, path = target_path, "Path allowed by robots.txt");
            }
        }
        Ok(decision)
    }
}
