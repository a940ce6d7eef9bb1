use crate::error::VidError;
use crate::model::{DispatchReport, DownloadOutcome, ScanResult, SizeStatus, VideoId};

/// Everything background tasks report back to the UI loop.
pub enum AppMessage {
    ScanComplete(ScanResult),
    ScanFailed { generation: u64, error: VidError },
    SizeResolved { id: VideoId, status: SizeStatus },
    DownloadFinished(DownloadOutcome),
    DispatchDone(DispatchReport),
}

/// The single status line. A newer notice replaces the older one.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn error(err: &VidError) -> Self {
        Notice::Error(err.to_string())
    }

    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DownloadProgress {
    pub in_flight: usize,
    pub succeeded: usize,
    pub failures: Vec<(String, String)>,
}

impl DownloadProgress {
    /// Counts restart once the previous batch has fully landed; overlapping
    /// batches share one tally.
    pub fn start(&mut self, count: usize) {
        if self.in_flight == 0 {
            self.succeeded = 0;
            self.failures.clear();
        }
        self.in_flight += count;
    }

    pub fn record(&mut self, outcome: &DownloadOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match &outcome.result {
            Ok(_) => self.succeeded += 1,
            Err(message) => self.failures.push((outcome.url.clone(), message.clone())),
        }
    }

    pub fn is_active(&self) -> bool {
        self.in_flight > 0
    }
}

/// Settings dialog edits a copy; nothing is written until it is saved.
#[derive(Debug, Clone, Default)]
pub struct SettingsDraft {
    pub destination_folder: String,
    pub ask_folder_before_download: bool,
    pub show_sizes_in_bytes: bool,
    pub field: super::SettingsField,
}
