#[derive(Debug, thiserror::Error)]
pub enum RobotsError {
    #[error("Invalid base URL `{0}`: {1}")]
    InvalidBaseUrl(String, url::ParseError),

    #[error("Base URL `{0}` has no origin")]
    NoOrigin(String),

    #[error("robots.txt HTTP Error Status Code = {0}")]
    HttpStatus(u16),

    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

impl RobotsError {
    /// Caller misuse, as opposed to an environmental failure the checker absorbs.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RobotsError::InvalidBaseUrl(..) | RobotsError::NoOrigin(_))
    }
}
