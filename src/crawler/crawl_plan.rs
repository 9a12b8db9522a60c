use crate::crawler::crawl_target::CrawlTarget;
use crate::crawler::crawler_config::CrawlerConfig;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unable to read crawl file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("Crawl plan has no targets")]
    NoTargets,

    #[error("Target `{0}` has no host to check robots.txt against")]
    InvalidTarget(String),
}

/// The immutable list of targets for one run, plus crawler settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlPlan {
    #[serde(flatten)]
    config: CrawlerConfig,
    targets: Vec<CrawlTarget>,
}

impl CrawlPlan {
    pub fn new(config: CrawlerConfig, targets: Vec<CrawlTarget>) -> Result<Self, ConfigError> {
        let plan = Self { config, targets };
        plan.validate()?;
        Ok(plan)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let plan: Self = toml::from_str(content)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        self.targets.iter().try_for_each(validate_target)
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CrawlerConfig {
        &mut self.config
    }

    pub fn targets(&self) -> &[CrawlTarget] {
        &self.targets
    }

    pub fn add_target(&mut self, target: CrawlTarget) -> Result<(), ConfigError> {
        validate_target(&target)?;
        self.targets.push(target);
        Ok(())
    }
}

fn validate_target(target: &CrawlTarget) -> Result<(), ConfigError> {
    if !target.url.has_host() {
        return Err(ConfigError::InvalidTarget(target.name.clone()));
    }
    Ok(())
}
