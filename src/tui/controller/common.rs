use crate::tui::state::AppMode;
use anyhow::Result;
use crossterm::event::KeyCode;

pub struct HelpContext<'a> {
    pub mode: &'a mut AppMode,
    pub prev_mode: &'a mut Option<AppMode>,
}

pub fn handle_help_key(ctx: &mut HelpContext, code: KeyCode) -> Result<()> {
    if matches!(code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?')) {
        *ctx.mode = ctx.prev_mode.unwrap_or(AppMode::VideoList);
        *ctx.prev_mode = None;
    }
    Ok(())
}

/// Line editing shared by every text field. Returns true if `input` changed.
pub fn edit_text(input: &mut String, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => {
            input.push(c);
            true
        }
        KeyCode::Backspace => input.pop().is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_returns_to_previous_mode() {
        let mut mode = AppMode::Help;
        let mut prev = Some(AppMode::UrlInput);
        let mut ctx = HelpContext {
            mode: &mut mode,
            prev_mode: &mut prev,
        };
        handle_help_key(&mut ctx, KeyCode::Esc).unwrap();
        assert_eq!(mode, AppMode::UrlInput);
        assert_eq!(prev, None);
    }

    #[test]
    fn test_edit_text() {
        let mut s = String::from("ab");
        assert!(edit_text(&mut s, KeyCode::Char('c')));
        assert!(edit_text(&mut s, KeyCode::Backspace));
        assert_eq!(s, "ab");
        assert!(!edit_text(&mut s, KeyCode::Left));
        s.clear();
        assert!(!edit_text(&mut s, KeyCode::Backspace));
    }
}
