use crate::selection::SelectionState;
use crate::tui::controller::common::edit_text;
use crate::tui::logic::clamp_selection;
use crate::tui::state::AppMode;
use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

pub struct FilterInputContext<'a> {
    pub filter_input: &'a mut String,
    pub selection: &'a mut SelectionState,
    pub list_state: &'a mut ListState,
    pub mode: &'a mut AppMode,
}

/// The list re-filters on every keystroke. Esc drops the name filter.
pub fn handle_filter_input_key(ctx: &mut FilterInputContext, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Enter => *ctx.mode = AppMode::VideoList,
        KeyCode::Esc => {
            ctx.filter_input.clear();
            ctx.selection.set_name_query("");
            *ctx.mode = AppMode::VideoList;
        }
        other => {
            if edit_text(ctx.filter_input, other) {
                ctx.selection.set_name_query(ctx.filter_input.clone());
            }
        }
    }
    clamp_selection(ctx.list_state, ctx.selection.displayed_ids().len());
    Ok(())
}
