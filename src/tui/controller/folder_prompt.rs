use crate::downloader::build_requests;
use crate::error::VidError;
use crate::model::VideoDescriptor;
use crate::tui::controller::common::edit_text;
use crate::tui::service::downloads::start_downloads;
use crate::tui::service::Services;
use crate::tui::state::{AppMode, DownloadProgress, Notice};
use anyhow::Result;
use crossterm::event::KeyCode;

pub struct FolderPromptContext<'a> {
    pub services: &'a Services,
    pub folder_input: &'a mut String,
    pub pending_dispatch: &'a mut Vec<VideoDescriptor>,
    pub downloads: &'a mut DownloadProgress,
    pub notice: &'a mut Option<Notice>,
    pub mode: &'a mut AppMode,
}

/// Enter sends the parked batch to the chosen folder; Esc drops the whole
/// batch without submitting anything.
pub fn handle_folder_prompt_key(ctx: &mut FolderPromptContext, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Enter => {
            let selected = std::mem::take(ctx.pending_dispatch);
            let requests = build_requests(&selected, ctx.folder_input.as_str());
            *ctx.mode = AppMode::VideoList;
            start_downloads(ctx.services, requests, ctx.downloads, ctx.notice);
        }
        KeyCode::Esc => {
            ctx.pending_dispatch.clear();
            *ctx.notice = Some(Notice::Info(VidError::PromptCancelled.to_string()));
            *ctx.mode = AppMode::VideoList;
        }
        other => {
            edit_text(ctx.folder_input, other);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::{SizeStatus, VideoId};

    #[test]
    fn test_escape_cancels_whole_batch() {
        let (services, rx) = Services::new(&Config::default()).unwrap();
        let mut folder_input = "movies".to_string();
        let mut pending = vec![VideoDescriptor {
            id: VideoId::new(1, 0),
            url: "https://x.com/a.mp4".into(),
            file_name: "a.mp4".into(),
            extension: "mp4".into(),
            size: SizeStatus::Unknown,
        }];
        let mut downloads = DownloadProgress::default();
        let mut notice = None;
        let mut mode = AppMode::FolderPrompt;

        let mut ctx = FolderPromptContext {
            services: &services,
            folder_input: &mut folder_input,
            pending_dispatch: &mut pending,
            downloads: &mut downloads,
            notice: &mut notice,
            mode: &mut mode,
        };
        handle_folder_prompt_key(&mut ctx, KeyCode::Esc).unwrap();

        assert!(pending.is_empty());
        assert_eq!(mode, AppMode::VideoList);
        assert_eq!(notice, Some(Notice::Info("Download cancelled.".into())));
        assert!(!downloads.is_active());
        assert!(rx.try_recv().is_err());
    }
}
