use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::model::{self, DispatchReport, DownloadOutcome, SizeStatus};

pub const SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub page_url: String,
    pub extensions: Vec<String>,
    pub videos: Vec<VideoItem>,
    pub total_known_bytes: u64,
    pub video_count: usize,
    pub scan_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub url: String,
    pub file_name: String,
    pub display_name: String,
    pub extension: String,
    /// Omitted while unresolved or unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    pub size_status: SizeState,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SizeState {
    Pending,
    Known,
    Unknown,
}

impl From<SizeStatus> for SizeState {
    fn from(status: SizeStatus) -> Self {
        match status {
            SizeStatus::Loading => SizeState::Pending,
            SizeStatus::Known(_) => SizeState::Known,
            SizeStatus::Unknown => SizeState::Unknown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadReport {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub status: ExecutionStatus,
    pub submitted: usize,
    pub succeeded: usize,
    pub total_bytes: u64,
    pub saved: Vec<SavedItem>,
    pub failed_items: Vec<FailedItem>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedItem {
    pub url: String,
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedItem {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    Partial,
    Failed,
}

impl ScanReport {
    pub fn new(result: &model::ScanResult, duration_ms: u64) -> Self {
        let videos: Vec<VideoItem> = result
            .videos
            .iter()
            .map(|v| VideoItem {
                id: v.id.to_string(),
                url: v.url.clone(),
                file_name: v.file_name.clone(),
                display_name: v.display_name(),
                extension: v.extension.clone(),
                size_bytes: v.size.bytes(),
                size_status: v.size.into(),
            })
            .collect();
        let total_known_bytes = videos.iter().filter_map(|v| v.size_bytes).sum();

        Self {
            version: SCHEMA_VERSION.to_string(),
            timestamp: Utc::now(),
            page_url: result.page_url.clone(),
            extensions: result.extensions(),
            video_count: videos.len(),
            videos,
            total_known_bytes,
            scan_duration_ms: duration_ms,
        }
    }
}

impl DownloadReport {
    pub fn new(report: &DispatchReport, outcomes: &[DownloadOutcome]) -> Self {
        let saved = outcomes
            .iter()
            .filter_map(|o| {
                o.result.as_ref().ok().map(|r| SavedItem {
                    url: o.url.clone(),
                    path: r.path.clone(),
                    bytes: r.bytes,
                })
            })
            .collect();
        let failed_items = report
            .failed
            .iter()
            .map(|(url, error)| FailedItem {
                url: url.clone(),
                error: error.clone(),
            })
            .collect();

        let status = if report.failed_count() == 0 {
            ExecutionStatus::Success
        } else if report.succeeded > 0 {
            ExecutionStatus::Partial
        } else {
            ExecutionStatus::Failed
        };

        Self {
            version: SCHEMA_VERSION.to_string(),
            timestamp: Utc::now(),
            status,
            submitted: report.submitted,
            succeeded: report.succeeded,
            total_bytes: report.total_bytes,
            saved,
            failed_items,
            duration_ms: report.duration.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DownloadReceipt;
    use crate::scanner::classify;
    use url::Url;

    #[test]
    fn test_scan_report_serializes_sizes() {
        let base = Url::parse("https://x.com/").unwrap();
        let mut result = classify(&["My%20Clip.mp4", "b.webm"], &base, 2);
        result.videos[0].size = SizeStatus::Known(1536);
        result.videos[1].size = SizeStatus::Unknown;

        let report = ScanReport::new(&result, 12);
        assert_eq!(report.video_count, 2);
        assert_eq!(report.total_known_bytes, 1536);
        assert_eq!(report.extensions, vec!["mp4", "webm"]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["videos"][0]["id"], "video-2-0");
        assert_eq!(json["videos"][0]["display_name"], "My Clip.mp4");
        assert_eq!(json["videos"][0]["size_bytes"], 1536);
        assert_eq!(json["videos"][1]["size_status"], "unknown");
        assert!(json["videos"][1].get("size_bytes").is_none());
    }

    #[test]
    fn test_download_report_status() {
        let outcomes = vec![
            DownloadOutcome {
                url: "https://x.com/a.mp4".into(),
                result: Ok(DownloadReceipt {
                    path: PathBuf::from("/tmp/a.mp4"),
                    bytes: 5,
                }),
            },
            DownloadOutcome {
                url: "https://x.com/b.mp4".into(),
                result: Err("HTTP 404".into()),
            },
        ];
        let mut dispatch = DispatchReport {
            submitted: 2,
            ..Default::default()
        };
        for outcome in &outcomes {
            dispatch.record(outcome);
        }

        let report = DownloadReport::new(&dispatch, &outcomes);
        assert_eq!(report.status, ExecutionStatus::Partial);
        assert_eq!(report.saved.len(), 1);
        assert_eq!(report.failed_items[0].error, "HTTP 404");
    }
}
