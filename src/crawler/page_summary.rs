use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub url: Url,
    pub status_code: u16,
    pub content_type: String,
    pub title: String,
    pub num_links: usize,
}

impl PageSummary {
    pub fn new(
        url: Url,
        status_code: u16,
        content_type: String,
        title: String,
        num_links: usize,
    ) -> Self {
        Self {
            url,
            status_code,
            content_type,
            title,
            num_links,
        }
    }
}
