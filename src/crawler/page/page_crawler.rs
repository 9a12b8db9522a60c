use crate::crawler::crawl_error::CrawlError;
use crate::crawler::page_summary::PageSummary;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;
use url::Url;

static TITLE_SELECTOR: LazyLock<scraper::Selector> =
    LazyLock::new(|| scraper::Selector::parse("title").expect("static selector"));
static LINK_SELECTOR: LazyLock<scraper::Selector> =
    LazyLock::new(|| scraper::Selector::parse("a[href]").expect("static selector"));

/// Fetches one HTML page and summarises it.
#[derive(Debug, Clone)]
pub struct PageCrawler {
    client: reqwest::Client,
    timeout: Duration,
}

impl PageCrawler {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub async fn crawl(&self, url: &Url) -> Result<PageSummary, CrawlError> {
        let crawl_response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await?;
        if !crawl_response.status().is_success() {
            return Err(CrawlError::HttpError(crawl_response.status().as_u16()));
        }
        let status_code = crawl_response.status().as_u16();

        let content_type_str = crawl_response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let content_type: mime::Mime = content_type_str.parse()?;
        match (content_type.type_(), content_type.subtype()) {
            (mime::TEXT, mime::HTML) => {}
            _ => return Err(CrawlError::NonHtmlContent(content_type_str)),
        }

        let html_text = crawl_response.text().await?;
        let (title, num_links) = summarize_html(&html_text);
        debug!(%url, num_links, "Page fetched");

        Ok(PageSummary::new(
            url.clone(),
            status_code,
            content_type_str,
            title,
            num_links,
        ))
    }
}

fn summarize_html(html_text: &str) -> (String, usize) {
    let document = scraper::Html::parse_document(html_text);
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_owned())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "No title".to_string());
    let num_links = document.select(&LINK_SELECTOR).count();
    (title, num_links)
}
