use crate::downloader::{Dispatcher, HttpDownloadExecutor};
use crate::history::HistoryLogger;
use crate::model::DownloadRequest;
use crate::tui::service::Services;
use crate::tui::state::{AppMessage, DownloadProgress, Notice};
use std::sync::Arc;

/// Hands the batch to the dispatcher on the runtime. Each outcome comes back
/// as its own message, followed by the batch summary.
pub fn start_downloads(
    services: &Services,
    requests: Vec<DownloadRequest>,
    downloads: &mut DownloadProgress,
    notice: &mut Option<Notice>,
) {
    if requests.is_empty() {
        return;
    }

    let count = requests.len();
    downloads.start(count);
    *notice = Some(Notice::Info(format!(
        "Downloading {} video(s) to {}",
        count,
        services.downloads_root.display()
    )));

    let executor = Arc::new(HttpDownloadExecutor::new(
        services.client.clone(),
        services.downloads_root.clone(),
    ));
    let dispatcher = Dispatcher::new(executor).with_history(HistoryLogger::new());
    let tx = services.sender.clone();

    services.runtime.spawn(async move {
        let report = dispatcher
            .dispatch(requests, |outcome| {
                let _ = tx.send(AppMessage::DownloadFinished(outcome.clone()));
            })
            .await;
        let _ = tx.send(AppMessage::DispatchDone(report));
    });
}
