use crate::robots::RobotsError;

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("HTTP Error Status Code = {0}")]
    HttpError(u16),

    #[error("Skipping non-HTML content type: {0}")]
    NonHtmlContent(String),

    #[error(transparent)]
    Robots(#[from] RobotsError),

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    MimeParseError(#[from] mime::FromStrError),
}
