use crate::error::VidError;
use crate::history::HistoryLogger;
use crate::model::{
    file_name_from_url, DestinationPolicy, DispatchReport, DownloadOutcome, DownloadRequest,
    VideoDescriptor, FALLBACK_FILE_NAME,
};
use crate::plugin::DownloadExecutor;
use crate::safety::destination_folder;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Name the file is saved under: the descriptor's own name, else the last
/// URL path segment, else the placeholder.
pub fn output_file_name(video: &VideoDescriptor) -> String {
    let name = video.file_name.trim();
    if !name.is_empty() {
        return name.to_string();
    }
    let derived = file_name_from_url(&video.url);
    if derived.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        derived
    }
}

pub fn validate_selection(selected: &[VideoDescriptor]) -> Result<(), VidError> {
    if selected.is_empty() {
        Err(VidError::EmptySelection)
    } else {
        Ok(())
    }
}

/// One request per video, all sharing the sanitized `folder`.
pub fn build_requests(selected: &[VideoDescriptor], folder: &str) -> Vec<DownloadRequest> {
    let destination = destination_folder(folder);
    selected
        .iter()
        .map(|video| DownloadRequest {
            url: video.url.clone(),
            filename: output_file_name(video),
            destination_folder: destination.clone(),
        })
        .collect()
}

/// Validates the selection and settles the destination folder.
///
/// With `ask_each_time` set, `prompt` is called with the stored default and
/// `None` from it cancels the whole batch. Otherwise the stored default is
/// used as is (empty means the downloads root itself).
pub fn prepare<F>(
    selected: &[VideoDescriptor],
    policy: &DestinationPolicy,
    prompt: F,
) -> Result<Vec<DownloadRequest>, VidError>
where
    F: FnOnce(&str) -> Option<String>,
{
    validate_selection(selected)?;

    let folder = if policy.ask_each_time {
        prompt(&policy.default_folder).ok_or(VidError::PromptCancelled)?
    } else {
        policy.default_folder.clone()
    };

    Ok(build_requests(selected, &folder))
}

/// Hands requests to the executor, each as its own task, and collects the
/// outcomes. A failed item never stops its siblings.
pub struct Dispatcher {
    executor: Arc<dyn DownloadExecutor>,
    history: Option<HistoryLogger>,
}

impl Dispatcher {
    pub fn new(executor: Arc<dyn DownloadExecutor>) -> Self {
        Self {
            executor,
            history: None,
        }
    }

    pub fn with_history(mut self, history: HistoryLogger) -> Self {
        self.history = Some(history);
        self
    }

    /// `on_outcome` sees every outcome in completion order.
    pub async fn dispatch<F>(&self, requests: Vec<DownloadRequest>, mut on_outcome: F) -> DispatchReport
    where
        F: FnMut(&DownloadOutcome),
    {
        let start = Instant::now();
        let mut report = DispatchReport {
            submitted: requests.len(),
            ..Default::default()
        };
        info!(count = requests.len(), "dispatching downloads");

        let mut set: JoinSet<DownloadOutcome> = JoinSet::new();
        for request in requests {
            let executor = Arc::clone(&self.executor);
            set.spawn(async move {
                let result = executor
                    .submit(&request)
                    .await
                    .map_err(|e| match e {
                        VidError::Download { message, .. } => message,
                        other => other.to_string(),
                    });
                DownloadOutcome {
                    url: request.url,
                    result,
                }
            });
        }

        while let Some(joined) = set.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(error = %e, "download task ended early");
                    continue;
                }
            };

            match &outcome.result {
                Ok(receipt) => info!(
                    url = %outcome.url,
                    path = %receipt.path.display(),
                    bytes = receipt.bytes,
                    "download finished"
                ),
                Err(message) => warn!(url = %outcome.url, error = %message, "download failed"),
            }

            if let Some(history) = &self.history {
                if let Err(e) = history.log_outcome(&outcome) {
                    warn!(error = %e, "could not write download history");
                }
            }

            report.record(&outcome);
            on_outcome(&outcome);
        }

        report.duration = start.elapsed();
        report
    }
}
