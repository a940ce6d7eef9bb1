use crate::selection::SelectionState;
use crate::tui::controller::common::edit_text;
use crate::tui::service::scanner::{start_scan, ScanStartParams};
use crate::tui::service::Services;
use crate::tui::state::{AppMode, Notice};
use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

pub struct UrlInputContext<'a> {
    pub services: &'a Services,
    pub url_input: &'a mut String,
    pub filter_input: &'a mut String,
    pub selection: &'a mut SelectionState,
    pub list_state: &'a mut ListState,
    pub notice: &'a mut Option<Notice>,
    pub mode: &'a mut AppMode,
    pub should_quit: &'a mut bool,
}

pub fn handle_url_input_key(ctx: &mut UrlInputContext, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Enter => {
            let mut params = ScanStartParams {
                services: ctx.services,
                url_input: ctx.url_input.as_str(),
                selection: ctx.selection,
                list_state: ctx.list_state,
                notice: ctx.notice,
                mode: ctx.mode,
            };
            if start_scan(&mut params) {
                ctx.filter_input.clear();
            }
        }
        KeyCode::Esc => {
            // Nothing to go back to before the first scan.
            if ctx.selection.generation() == 0 {
                *ctx.should_quit = true;
            } else {
                *ctx.mode = AppMode::VideoList;
            }
        }
        other => {
            if edit_text(ctx.url_input, other) {
                *ctx.notice = None;
            }
        }
    }
    Ok(())
}
