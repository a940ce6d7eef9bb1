use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::model::DownloadOutcome;

pub const ACTION_DOWNLOAD: &str = "DOWNLOAD";
pub const ACTION_FAILED: &str = "FAILED";

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub url: String,
    pub size: Option<u64>,
}

impl HistoryEntry {
    pub fn new(action: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            url: url.into(),
            size: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn from_outcome(outcome: &DownloadOutcome) -> Self {
        match &outcome.result {
            Ok(receipt) => HistoryEntry::new(ACTION_DOWNLOAD, &outcome.url).with_size(receipt.bytes),
            Err(_) => HistoryEntry::new(ACTION_FAILED, &outcome.url),
        }
    }

    pub fn to_log_line(&self) -> String {
        let size_str = self
            .size
            .map(|s| format!(" size={}", s))
            .unwrap_or_default();
        format!(
            "{} {} {}{}\n",
            self.timestamp.to_rfc3339(),
            self.action,
            self.url,
            size_str
        )
    }

    // URLs never contain raw spaces once normalized, so a plain split is safe.
    pub fn parse_line(line: &str) -> Option<HistoryEntry> {
        let parts: Vec<&str> = line.splitn(4, ' ').collect();
        if parts.len() < 3 {
            return None;
        }

        let timestamp = DateTime::parse_from_rfc3339(parts[0])
            .ok()?
            .with_timezone(&Utc);
        let size = parts
            .get(3)
            .and_then(|s| s.strip_prefix("size=").and_then(|s| s.trim().parse::<u64>().ok()));

        Some(HistoryEntry {
            timestamp,
            action: parts[1].to_string(),
            url: parts[2].to_string(),
            size,
        })
    }
}

pub struct HistoryLogger {
    log_path: PathBuf,
}

impl HistoryLogger {
    pub fn new() -> Self {
        Self::at(Config::data_dir().join("history.log"))
    }

    pub fn at(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn log(&self, entry: &HistoryEntry) -> Result<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        write!(file, "{}", entry.to_log_line())?;
        Ok(())
    }

    pub fn log_outcome(&self, outcome: &DownloadOutcome) -> Result<()> {
        self.log(&HistoryEntry::from_outcome(outcome))
    }

    /// Newest first when `limit` is given, file order otherwise.
    pub fn read_history(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path)?;
        let entries: Vec<HistoryEntry> = content.lines().filter_map(HistoryEntry::parse_line).collect();

        let result = if let Some(n) = limit {
            entries.into_iter().rev().take(n).collect()
        } else {
            entries
        };

        Ok(result)
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

impl Default for HistoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DownloadReceipt;
    use tempfile::tempdir;

    #[test]
    fn test_parse_line_with_size() {
        let entry = HistoryEntry::parse_line(
            "2026-03-01T10:00:00+00:00 DOWNLOAD https://x.com/a.mp4 size=1536",
        )
        .unwrap();
        assert_eq!(entry.action, ACTION_DOWNLOAD);
        assert_eq!(entry.url, "https://x.com/a.mp4");
        assert_eq!(entry.size, Some(1536));
    }

    #[test]
    fn test_parse_line_rejects_garbage() {
        assert!(HistoryEntry::parse_line("").is_none());
        assert!(HistoryEntry::parse_line("yesterday DOWNLOAD x").is_none());
    }

    #[test]
    fn test_log_outcomes_and_read_back() {
        let dir = tempdir().unwrap();
        let logger = HistoryLogger::at(dir.path().join("logs").join("history.log"));

        logger
            .log_outcome(&DownloadOutcome {
                url: "https://x.com/a.mp4".into(),
                result: Ok(DownloadReceipt {
                    path: dir.path().join("a.mp4"),
                    bytes: 42,
                }),
            })
            .unwrap();
        logger
            .log_outcome(&DownloadOutcome {
                url: "https://x.com/b.mp4".into(),
                result: Err("HTTP 500".into()),
            })
            .unwrap();

        let all = logger.read_history(None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].size, Some(42));
        assert_eq!(all[1].action, ACTION_FAILED);

        let latest = logger.read_history(Some(1)).unwrap();
        assert_eq!(latest[0].url, "https://x.com/b.mp4");
    }

    #[test]
    fn test_missing_log_is_empty() {
        let dir = tempdir().unwrap();
        let logger = HistoryLogger::at(dir.path().join("none.log"));
        assert!(logger.read_history(Some(5)).unwrap().is_empty());
    }
}
