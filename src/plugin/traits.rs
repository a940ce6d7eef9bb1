use crate::error::VidError;
use crate::model::{DownloadReceipt, DownloadRequest};
use async_trait::async_trait;
use url::Url;

/// Raw material handed back by a page scan, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub base_url: Url,
    pub candidates: Vec<String>,
}

/// Collaborator that reads a page and lists every URL that might be a video.
#[async_trait]
pub trait PageSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, page_url: &Url) -> Result<PageSnapshot, VidError>;
}

/// Collaborator that performs one download per request. Implementations report
/// each request on its own; nothing is promised about ordering across a batch.
#[async_trait]
pub trait DownloadExecutor: Send + Sync {
    async fn submit(&self, request: &DownloadRequest) -> Result<DownloadReceipt, VidError>;
}

#[async_trait]
pub trait SizeProbe: Send + Sync {
    /// Byte length of the resource, or `None` when it cannot be determined.
    async fn probe(&self, url: &str) -> Option<u64>;
}
