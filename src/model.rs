use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const FALLBACK_FILE_NAME: &str = "download";

/// Handle for one discovered video. The scan generation is part of the id,
/// so ids from an earlier scan never collide with the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VideoId {
    pub generation: u64,
    pub index: usize,
}

impl VideoId {
    pub fn new(generation: u64, index: usize) -> Self {
        Self { generation, index }
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "video-{}-{}", self.generation, self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeStatus {
    #[default]
    Loading,
    Known(u64),
    Unknown,
}

impl SizeStatus {
    pub fn from_probe(size: Option<u64>) -> Self {
        match size {
            Some(bytes) => SizeStatus::Known(bytes),
            None => SizeStatus::Unknown,
        }
    }

    pub fn bytes(self) -> Option<u64> {
        match self {
            SizeStatus::Known(bytes) => Some(bytes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoDescriptor {
    pub id: VideoId,
    pub url: String,
    pub file_name: String,
    pub extension: String,
    pub size: SizeStatus,
}

impl VideoDescriptor {
    /// File name as a person would read it: percent-decoded, `+` as space.
    pub fn display_name(&self) -> String {
        let raw = if self.file_name.is_empty() {
            file_name_from_url(&self.url)
        } else {
            self.file_name.clone()
        };
        let spaced = raw.replace('+', " ");
        match urlencoding::decode(&spaced) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => spaced,
        }
    }
}

/// Last path segment of `url`, or the generic placeholder.
pub fn file_name_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub generation: u64,
    pub page_url: String,
    pub videos: Vec<VideoDescriptor>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self
            .videos
            .iter()
            .filter(|v| !v.extension.is_empty())
            .map(|v| v.extension.clone())
            .collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationPolicy {
    pub default_folder: String,
    pub ask_each_time: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
    pub destination_folder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReceipt {
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub url: String,
    pub result: Result<DownloadReceipt, String>,
}

#[derive(Debug, Default)]
pub struct DispatchReport {
    pub submitted: usize,
    pub succeeded: usize,
    pub total_bytes: u64,
    pub failed: Vec<(String, String)>,
    pub duration: Duration,
}

impl DispatchReport {
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        match &outcome.result {
            Ok(receipt) => {
                self.succeeded += 1;
                self.total_bytes += receipt.bytes;
            }
            Err(message) => self.failed.push((outcome.url.clone(), message.clone())),
        }
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(url: &str, file_name: &str) -> VideoDescriptor {
        VideoDescriptor {
            id: VideoId::new(1, 0),
            url: url.to_string(),
            file_name: file_name.to_string(),
            extension: "mp4".to_string(),
            size: SizeStatus::Loading,
        }
    }

    #[test]
    fn test_video_id_display() {
        assert_eq!(VideoId::new(3, 7).to_string(), "video-3-7");
    }

    #[test]
    fn test_display_name_decodes() {
        let v = descriptor("https://x.com/My%20Clip+1.mp4", "My%20Clip+1.mp4");
        assert_eq!(v.display_name(), "My Clip 1.mp4");
    }

    #[test]
    fn test_display_name_keeps_raw_on_bad_encoding() {
        let v = descriptor("https://x.com/a.mp4", "%FF%FE.mp4");
        assert_eq!(v.display_name(), "%FF%FE.mp4");
    }

    #[test]
    fn test_display_name_falls_back_to_url() {
        let v = descriptor("https://x.com/dir/clip.webm", "");
        assert_eq!(v.display_name(), "clip.webm");
    }

    #[test]
    fn test_file_name_from_url_placeholder() {
        assert_eq!(file_name_from_url("https://x.com/"), FALLBACK_FILE_NAME);
        assert_eq!(file_name_from_url("not a url"), FALLBACK_FILE_NAME);
    }

    #[test]
    fn test_extensions_sorted_unique() {
        let mut a = descriptor("https://x.com/a.webm", "a.webm");
        a.extension = "webm".into();
        let b = descriptor("https://x.com/b.mp4", "b.mp4");
        let c = descriptor("https://x.com/c.mp4", "c.mp4");
        let result = ScanResult {
            generation: 1,
            page_url: "https://x.com/".into(),
            videos: vec![a, b, c],
        };
        assert_eq!(result.extensions(), vec!["mp4", "webm"]);
    }
}
