pub mod classify;
pub mod page;
pub mod size;

pub use classify::classify;
pub use page::HttpPageSource;
pub use size::SizeResolver;

use crate::config::ScanConfig;
use crate::error::VidError;
use crate::model::{ScanResult, SizeStatus, VideoDescriptor, VideoId};
use crate::plugin::{PageSource, SizeProbe};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};
use url::Url;

/// Shared HTTP client for page fetches, size probes and downloads.
pub fn build_client(config: &ScanConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(Duration::from_secs(config.timeout_secs.max(1)))
        .build()?;
    Ok(client)
}

/// Validates what the user typed as a page address. A missing scheme is
/// read as `https://`.
pub fn parse_page_url(input: &str) -> Result<Url, VidError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(VidError::EmptyUrl);
    }

    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&candidate).map_err(|e| VidError::InvalidUrl(format!("{}: {}", input, e)))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(VidError::InvalidUrl(input.to_string())),
    }
}

/// One full scan: fetch the page, then classify its candidates under
/// `generation`.
pub async fn scan_page(
    source: &dyn PageSource,
    page_url: &Url,
    generation: u64,
) -> Result<ScanResult, VidError> {
    let snapshot = source.fetch(page_url).await?;
    let mut result = classify(&snapshot.candidates, &snapshot.base_url, generation);
    result.page_url = page_url.to_string();

    info!(
        source = source.name(),
        url = %page_url,
        candidates = snapshot.candidates.len(),
        videos = result.len(),
        "scan finished"
    );
    Ok(result)
}

/// Probes every video with at most `concurrency` requests in flight and hands
/// each answer to `on_result` as soon as it lands. Completion order is
/// whatever the network gives.
pub async fn resolve_sizes<F>(
    probe: Arc<dyn SizeProbe>,
    videos: &[VideoDescriptor],
    concurrency: usize,
    mut on_result: F,
) where
    F: FnMut(VideoId, SizeStatus),
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut set: JoinSet<(VideoId, SizeStatus)> = JoinSet::new();

    for video in videos {
        let probe = Arc::clone(&probe);
        let semaphore = Arc::clone(&semaphore);
        let id = video.id;
        let url = video.url.clone();

        set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let size = probe.probe(&url).await;
            if size.is_none() {
                debug!(url = %url, "size unknown");
            }
            (id, SizeStatus::from_probe(size))
        });
    }

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((id, status)) => on_result(id, status),
            Err(e) => debug!(error = %e, "size probe task ended early"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::PageSnapshot;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FixedPage(Vec<&'static str>);

    #[async_trait]
    impl PageSource for FixedPage {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch(&self, page_url: &Url) -> Result<PageSnapshot, VidError> {
            Ok(PageSnapshot {
                base_url: page_url.clone(),
                candidates: self.0.iter().map(|s| s.to_string()).collect(),
            })
        }
    }

    struct FailingPage;

    #[async_trait]
    impl PageSource for FailingPage {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, _page_url: &Url) -> Result<PageSnapshot, VidError> {
            Err(VidError::Scan("connection reset".into()))
        }
    }

    struct TableProbe(HashMap<String, u64>);

    #[async_trait]
    impl SizeProbe for TableProbe {
        async fn probe(&self, url: &str) -> Option<u64> {
            self.0.get(url).copied()
        }
    }

    #[test]
    fn test_parse_page_url() {
        assert_eq!(parse_page_url("   "), Err(VidError::EmptyUrl));
        assert_eq!(
            parse_page_url("example.com/videos").unwrap().as_str(),
            "https://example.com/videos"
        );
        assert!(matches!(
            parse_page_url("ftp://example.com/"),
            Err(VidError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_page_url("http://"),
            Err(VidError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_scan_page_classifies_candidates() {
        let source = FixedPage(vec!["/a/clip.mp4", "index.html", "b.webm", "/a/clip.mp4"]);
        let url = Url::parse("https://x.com/page/").unwrap();

        let result = scan_page(&source, &url, 4).await.unwrap();
        assert_eq!(result.generation, 4);
        assert_eq!(result.page_url, "https://x.com/page/");
        assert_eq!(result.len(), 2);
        assert_eq!(result.videos[1].url, "https://x.com/page/b.webm");
    }

    #[tokio::test]
    async fn test_scan_page_propagates_failure() {
        let url = Url::parse("https://x.com/").unwrap();
        let err = scan_page(&FailingPage, &url, 1).await.unwrap_err();
        assert!(matches!(err, VidError::Scan(_)));
    }

    #[tokio::test]
    async fn test_resolve_sizes_reports_every_video() {
        let url = Url::parse("https://x.com/").unwrap();
        let result = classify(&["a.mp4", "b.mp4", "c.mp4"], &url, 1);

        let mut sizes = HashMap::new();
        sizes.insert("https://x.com/a.mp4".to_string(), 10);
        sizes.insert("https://x.com/c.mp4".to_string(), 30);
        let probe: Arc<dyn SizeProbe> = Arc::new(TableProbe(sizes));

        let mut seen = Vec::new();
        resolve_sizes(probe, &result.videos, 2, |id, status| seen.push((id.index, status))).await;
        seen.sort_by_key(|(index, _)| *index);

        assert_eq!(
            seen,
            vec![
                (0, SizeStatus::Known(10)),
                (1, SizeStatus::Unknown),
                (2, SizeStatus::Known(30)),
            ]
        );
    }
}
