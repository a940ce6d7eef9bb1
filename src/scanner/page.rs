use crate::error::VidError;
use crate::plugin::{PageSnapshot, PageSource};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Attributes that sites commonly use for lazily loaded media, in scan order.
pub const DATA_ATTRIBUTES: &[&str] = &[
    "data-src",
    "data-video",
    "data-video-src",
    "data-url",
    "data-file",
];

/// Reads a page over HTTP and collects candidate URLs from its markup.
pub struct HttpPageSource {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpPageSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(20),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, page_url: &Url) -> Result<PageSnapshot, VidError> {
        info!(url = %page_url, "fetching page");

        let response = self
            .client
            .get(page_url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| VidError::Scan(format!("could not reach {}: {}", page_url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VidError::Scan(format!(
                "{} returned HTTP {}",
                page_url,
                status.as_u16()
            )));
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| VidError::Scan(format!("could not read {}: {}", page_url, e)))?;

        let snapshot = extract_candidates(&body, &final_url);
        debug!(
            candidates = snapshot.candidates.len(),
            base = %snapshot.base_url,
            "page parsed"
        );
        Ok(snapshot)
    }
}

/// Candidate URLs in scan order: anchors, `<video>`, `<source>`, then each
/// data attribute. Within a source, document order is kept.
pub fn extract_candidates(html: &str, page_url: &Url) -> PageSnapshot {
    let document = Html::parse_document(html);
    let base_url = document_base(&document, page_url);

    let mut candidates = Vec::new();
    collect_attribute(&document, "a[href]", "href", &mut candidates);
    collect_attribute(&document, "video[src]", "src", &mut candidates);
    collect_attribute(&document, "source[src]", "src", &mut candidates);
    for attr in DATA_ATTRIBUTES {
        collect_attribute(&document, &format!("[{}]", attr), attr, &mut candidates);
    }

    PageSnapshot {
        base_url,
        candidates,
    }
}

fn collect_attribute(document: &Html, selector: &str, attr: &str, out: &mut Vec<String>) {
    let selector = match Selector::parse(selector) {
        Ok(s) => s,
        Err(_) => return,
    };

    for el in document.select(&selector) {
        if let Some(value) = el.value().attr(attr) {
            out.push(value.trim().to_string());
        }
    }
}

// First <base href> wins, like in a browser.
fn document_base(document: &Html, page_url: &Url) -> Url {
    let selector = match Selector::parse("base[href]") {
        Ok(s) => s,
        Err(_) => return page_url.clone(),
    };

    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}
