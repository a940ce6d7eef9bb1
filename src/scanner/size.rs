use crate::plugin::SizeProbe;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_RANGE, RANGE};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Finds the byte length of a remote file without downloading it.
///
/// A HEAD request is tried first. When that is refused or carries no length,
/// a one-byte range request is made and the total is read from
/// `Content-Range`. Every failure ends in `None`.
pub struct SizeResolver {
    client: reqwest::Client,
    timeout: Duration,
}

impl SizeResolver {
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

    pub async fn resolve(&self, url: &str) -> Option<u64> {
        if let Some(size) = self.probe_head(url).await {
            return Some(size);
        }
        self.probe_range(url).await
    }

    async fn probe_head(&self, url: &str) -> Option<u64> {
        let response = match self.client.head(url).timeout(self.timeout).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(url, error = %e, "HEAD probe failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(url, status = response.status().as_u16(), "HEAD probe rejected");
            return None;
        }

        declared_size(response.headers())
    }

    async fn probe_range(&self, url: &str) -> Option<u64> {
        let request = self
            .client
            .get(url)
            .header(RANGE, "bytes=0-0")
            .timeout(self.timeout);
        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(url, error = %e, "range probe failed");
                return None;
            }
        };

        let status = response.status();
        if !(status.is_success() || status == StatusCode::PARTIAL_CONTENT) {
            debug!(url, status = status.as_u16(), "range probe rejected");
            return None;
        }

        let headers = response.headers();
        content_range_total(headers).or_else(|| content_length(headers))
    }
}

#[async_trait]
impl SizeProbe for SizeResolver {
    async fn probe(&self, url: &str) -> Option<u64> {
        self.resolve(url).await
    }
}

/// Length declared by a metadata response: `Content-Length`, else the `Content-Range` total.
fn declared_size(headers: &HeaderMap) -> Option<u64> {
    content_length(headers).or_else(|| content_range_total(headers))
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Total from `Content-Range: bytes 0-0/12345`. An unknown total (`*`) gives `None`.
fn content_range_total(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_range_total)
}

pub fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}
