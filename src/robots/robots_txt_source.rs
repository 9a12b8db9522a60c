use crate::robots::robots_error::RobotsError;
use std::time::Duration;
use url::Url;

/// Raw robots.txt body fetched from one origin.
#[derive(Debug, Clone)]
pub struct RobotsTxtSource {
    origin: String,
    content: String,
}

impl RobotsTxtSource {
    /// Resolves `/robots.txt` against the origin of `base_url`.
    pub fn robots_txt_url(base_url: &Url) -> Result<Url, RobotsError> {
        if !base_url.has_host() {
            return Err(RobotsError::NoOrigin(base_url.to_string()));
        }
        base_url
            .join("/robots.txt")
            .map_err(|e| RobotsError::InvalidBaseUrl(base_url.to_string(), e))
    }

    /// Issues exactly one GET; any non-2xx status is reported as an error.
    pub async fn load_from_url(
        client: &reqwest::Client,
        base_url: &Url,
        timeout: Duration,
    ) -> Result<Self, RobotsError> {
        let robots_txt_url = Self::robots_txt_url(base_url)?;
        let robots_response = client.get(robots_txt_url).timeout(timeout).send().await?;
        if !robots_response.status().is_success() {
            return Err(RobotsError::HttpStatus(robots_response.status().as_u16()));
        }
        let content = robots_response.text().await?;
        Ok(Self {
            origin: base_url.origin().ascii_serialization(),
            content,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
