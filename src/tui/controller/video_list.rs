use crate::config::Config;
use crate::downloader::{build_requests, validate_selection};
use crate::model::VideoDescriptor;
use crate::selection::{FilterCriteria, SelectionState};
use crate::tui::logic::{clamp_selection, navigate_down, navigate_up};
use crate::tui::service::downloads::start_downloads;
use crate::tui::service::scanner::{start_scan, ScanStartParams};
use crate::tui::service::Services;
use crate::tui::state::{AppMode, DownloadProgress, Notice, SettingsDraft};
use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

pub struct VideoListContext<'a> {
    pub services: &'a Services,
    pub config: &'a Config,
    pub selection: &'a mut SelectionState,
    pub list_state: &'a mut ListState,
    pub mode: &'a mut AppMode,
    pub prev_mode: &'a mut Option<AppMode>,
    pub should_quit: &'a mut bool,
    pub url_input: &'a str,
    pub filter_input: &'a mut String,
    pub folder_input: &'a mut String,
    pub pending_dispatch: &'a mut Vec<VideoDescriptor>,
    pub settings: &'a mut SettingsDraft,
    pub notice: &'a mut Option<Notice>,
    pub downloads: &'a mut DownloadProgress,
}

pub fn handle_video_list_key(ctx: &mut VideoListContext, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => *ctx.should_quit = true,
        KeyCode::Up => navigate_up(ctx.list_state),
        KeyCode::Down => navigate_down(ctx.list_state, ctx.selection.displayed_ids().len()),
        KeyCode::Char(' ') => {
            if let Some(id) = focused_id(ctx.selection, ctx.list_state) {
                ctx.selection.toggle_item(id);
            }
        }
        KeyCode::Char('a') => ctx.selection.toggle_select_all(),
        KeyCode::Char('/') => {
            *ctx.filter_input = ctx.selection.criteria().name_query.clone();
            *ctx.mode = AppMode::FilterInput;
        }
        KeyCode::Char('e') => {
            if ctx.selection.view().extension_filter_available {
                ctx.selection.cycle_extension_filter();
                clamp_selection(ctx.list_state, ctx.selection.displayed_ids().len());
            }
        }
        KeyCode::Char('c') => {
            ctx.filter_input.clear();
            ctx.selection.on_filter_change(FilterCriteria::default());
            clamp_selection(ctx.list_state, ctx.selection.displayed_ids().len());
        }
        KeyCode::Char('x') => {
            ctx.selection.clear();
            ctx.filter_input.clear();
            ctx.list_state.select(None);
            *ctx.notice = Some(Notice::Info("Results cleared.".to_string()));
        }
        KeyCode::Enter | KeyCode::Char('d') => request_download(ctx),
        KeyCode::Char('r') => {
            let mut params = ScanStartParams {
                services: ctx.services,
                url_input: ctx.url_input,
                selection: ctx.selection,
                list_state: ctx.list_state,
                notice: ctx.notice,
                mode: ctx.mode,
            };
            start_scan(&mut params);
            ctx.filter_input.clear();
        }
        KeyCode::Char('u') => *ctx.mode = AppMode::UrlInput,
        KeyCode::Char('o') => {
            *ctx.settings = SettingsDraft {
                destination_folder: ctx.config.download.destination_folder.clone(),
                ask_folder_before_download: ctx.config.download.ask_folder_before_download,
                show_sizes_in_bytes: ctx.config.ui.show_sizes_in_bytes,
                field: Default::default(),
            };
            *ctx.mode = AppMode::Settings;
        }
        KeyCode::Char('?') => {
            *ctx.prev_mode = Some(*ctx.mode);
            *ctx.mode = AppMode::Help;
        }
        _ => {}
    }
    Ok(())
}

fn focused_id(
    selection: &SelectionState,
    list_state: &ListState,
) -> Option<crate::model::VideoId> {
    let idx = list_state.selected()?;
    selection.displayed_ids().get(idx).copied()
}

/// Downloads what is selected and visible. With the ask-each-time policy the
/// batch is parked until the folder prompt is answered.
fn request_download(ctx: &mut VideoListContext) {
    let selected = ctx.selection.selected_descriptors();
    if let Err(e) = validate_selection(&selected) {
        *ctx.notice = Some(Notice::error(&e));
        return;
    }

    let policy = ctx.config.destination_policy();
    if policy.ask_each_time {
        *ctx.folder_input = policy.default_folder;
        *ctx.pending_dispatch = selected;
        *ctx.mode = AppMode::FolderPrompt;
        return;
    }

    let requests = build_requests(&selected, &policy.default_folder);
    start_downloads(ctx.services, requests, ctx.downloads, ctx.notice);
}
