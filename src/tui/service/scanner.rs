use crate::error::VidError;
use crate::plugin::SizeProbe;
use crate::scanner::{parse_page_url, resolve_sizes, scan_page, HttpPageSource, SizeResolver};
use crate::selection::SelectionState;
use crate::tui::logic::clamp_selection;
use crate::tui::service::Services;
use crate::tui::state::{AppMessage, AppMode, DownloadProgress, Notice};
use ratatui::widgets::ListState;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ScanStartParams<'a> {
    pub services: &'a Services,
    pub url_input: &'a str,
    pub selection: &'a mut SelectionState,
    pub list_state: &'a mut ListState,
    pub notice: &'a mut Option<Notice>,
    pub mode: &'a mut AppMode,
}

/// Validates the URL, resets the list and fires off the fetch. Size probes
/// follow once the page is classified. Returns false if nothing was started.
pub fn start_scan(params: &mut ScanStartParams) -> bool {
    let page_url = match parse_page_url(params.url_input) {
        Ok(url) => url,
        Err(e) => {
            *params.notice = Some(Notice::error(&e));
            *params.mode = AppMode::UrlInput;
            return false;
        }
    };

    let generation = params.selection.begin_scan();
    params.list_state.select(None);
    *params.notice = None;
    *params.mode = AppMode::VideoList;
    info!(url = %page_url, generation, "scan requested");

    let services = params.services;
    let client = services.client.clone();
    let tx = services.sender.clone();
    let timeout = services.timeout;
    let concurrency = services.probe_concurrency;

    services.runtime.spawn(async move {
        let source = HttpPageSource::new(client.clone()).with_timeout(timeout);
        let result = match scan_page(&source, &page_url, generation).await {
            Ok(result) => result,
            Err(error) => {
                let _ = tx.send(AppMessage::ScanFailed { generation, error });
                return;
            }
        };

        let videos = result.videos.clone();
        if tx.send(AppMessage::ScanComplete(result)).is_err() {
            return;
        }

        let probe: Arc<dyn SizeProbe> = Arc::new(SizeResolver::new(client).with_timeout(timeout));
        resolve_sizes(probe, &videos, concurrency, |id, status| {
            let _ = tx.send(AppMessage::SizeResolved { id, status });
        })
        .await;
        debug!(generation, "size probes finished");
    });

    true
}

pub struct PollContext<'a> {
    pub receiver: &'a Receiver<AppMessage>,
    pub selection: &'a mut SelectionState,
    pub list_state: &'a mut ListState,
    pub notice: &'a mut Option<Notice>,
    pub downloads: &'a mut DownloadProgress,
}

/// Drains every pending message. Stale scan results and sizes are filtered
/// out by the selection state itself.
pub fn poll_messages(ctx: &mut PollContext) {
    loop {
        match ctx.receiver.try_recv() {
            Ok(message) => apply_message(ctx, message),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }
}

fn apply_message(ctx: &mut PollContext, message: AppMessage) {
    match message {
        AppMessage::ScanComplete(result) => {
            let count = result.len();
            if ctx.selection.on_scan_complete(result) {
                clamp_selection(ctx.list_state, ctx.selection.displayed_ids().len());
                if count > 0 {
                    *ctx.notice = Some(Notice::Info(format!("Found {} video(s).", count)));
                }
            }
        }
        AppMessage::ScanFailed { generation, error } => {
            if ctx.selection.on_scan_failed(generation, error.to_string()) {
                *ctx.notice = Some(Notice::error(&error));
            }
        }
        AppMessage::SizeResolved { id, status } => {
            ctx.selection.apply_size(id, status);
        }
        AppMessage::DownloadFinished(outcome) => {
            ctx.downloads.record(&outcome);
            if let Err(message) = &outcome.result {
                *ctx.notice = Some(Notice::error(&VidError::Download {
                    url: outcome.url.clone(),
                    message: message.clone(),
                }));
            }
        }
        AppMessage::DispatchDone(report) => {
            let summary = format!(
                "Downloaded {} of {} in {:.1}s",
                report.succeeded,
                report.submitted,
                report.duration.as_secs_f64()
            );
            *ctx.notice = Some(if report.failed_count() > 0 {
                Notice::Error(format!("{} ({} failed)", summary, report.failed_count()))
            } else {
                Notice::Info(summary)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DispatchReport, DownloadOutcome, SizeStatus};
    use crate::scanner::classify;
    use std::sync::mpsc::channel;
    use url::Url;

    fn scan(generation: u64) -> crate::model::ScanResult {
        let base = Url::parse("https://x.com/").unwrap();
        classify(&["a.mp4", "b.webm"], &base, generation)
    }

    #[test]
    fn test_poll_applies_scan_and_sizes() {
        let (tx, rx) = channel();
        let mut selection = SelectionState::new();
        let mut list_state = ListState::default();
        let mut notice = None;
        let mut downloads = DownloadProgress::default();

        let generation = selection.begin_scan();
        let result = scan(generation);
        let first = result.videos[0].id;
        tx.send(AppMessage::ScanComplete(result)).unwrap();
        tx.send(AppMessage::SizeResolved {
            id: first,
            status: SizeStatus::Known(1536),
        })
        .unwrap();

        let mut ctx = PollContext {
            receiver: &rx,
            selection: &mut selection,
            list_state: &mut list_state,
            notice: &mut notice,
            downloads: &mut downloads,
        };
        poll_messages(&mut ctx);

        assert_eq!(selection.all().len(), 2);
        assert_eq!(selection.all()[0].size, SizeStatus::Known(1536));
        assert_eq!(list_state.selected(), Some(0));
        assert_eq!(notice, Some(Notice::Info("Found 2 video(s).".into())));
    }

    #[test]
    fn test_poll_ignores_superseded_scan() {
        let (tx, rx) = channel();
        let mut selection = SelectionState::new();
        let mut list_state = ListState::default();
        let mut notice = None;
        let mut downloads = DownloadProgress::default();

        let old = selection.begin_scan();
        selection.begin_scan();
        tx.send(AppMessage::ScanComplete(scan(old))).unwrap();
        tx.send(AppMessage::ScanFailed {
            generation: old,
            error: VidError::Scan("timeout".into()),
        })
        .unwrap();

        let mut ctx = PollContext {
            receiver: &rx,
            selection: &mut selection,
            list_state: &mut list_state,
            notice: &mut notice,
            downloads: &mut downloads,
        };
        poll_messages(&mut ctx);

        assert!(selection.all().is_empty());
        assert!(selection.is_scanning());
        assert_eq!(notice, None);
    }

    #[test]
    fn test_poll_reports_each_failed_download() {
        let (tx, rx) = channel();
        let mut selection = SelectionState::new();
        let mut list_state = ListState::default();
        let mut notice = None;
        let mut downloads = DownloadProgress::default();
        downloads.start(2);

        let failed = DownloadOutcome {
            url: "https://x.com/b.mp4".into(),
            result: Err("HTTP 500".into()),
        };
        tx.send(AppMessage::DownloadFinished(failed.clone())).unwrap();
        let mut report = DispatchReport {
            submitted: 2,
            succeeded: 1,
            ..Default::default()
        };
        report.record(&failed);
        tx.send(AppMessage::DispatchDone(report)).unwrap();

        let mut ctx = PollContext {
            receiver: &rx,
            selection: &mut selection,
            list_state: &mut list_state,
            notice: &mut notice,
            downloads: &mut downloads,
        };
        poll_messages(&mut ctx);

        assert_eq!(downloads.failures.len(), 1);
        assert_eq!(downloads.in_flight, 1);
        let notice = notice.unwrap();
        assert!(notice.is_error());
        assert!(notice.text().contains("1 failed"));
    }
}
