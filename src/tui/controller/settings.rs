use crate::config::Config;
use crate::model::DestinationPolicy;
use crate::tui::controller::common::edit_text;
use crate::tui::service::Services;
use crate::tui::state::{AppMode, Notice, SettingsDraft, SettingsField};
use anyhow::Result;
use crossterm::event::KeyCode;
use tracing::warn;

pub struct SettingsContext<'a> {
    pub services: &'a mut Services,
    pub config: &'a mut Config,
    pub settings: &'a mut SettingsDraft,
    pub notice: &'a mut Option<Notice>,
    pub mode: &'a mut AppMode,
}

pub fn handle_settings_key(ctx: &mut SettingsContext, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Up => ctx.settings.field = ctx.settings.field.prev(),
        KeyCode::Down | KeyCode::Tab => ctx.settings.field = ctx.settings.field.next(),
        KeyCode::Esc => *ctx.mode = AppMode::VideoList,
        KeyCode::Enter => {
            save_settings(ctx);
            *ctx.mode = AppMode::VideoList;
        }
        KeyCode::Char(' ') if ctx.settings.field != SettingsField::DestinationFolder => {
            match ctx.settings.field {
                SettingsField::AskFolder => {
                    ctx.settings.ask_folder_before_download =
                        !ctx.settings.ask_folder_before_download
                }
                SettingsField::ShowBytes => {
                    ctx.settings.show_sizes_in_bytes = !ctx.settings.show_sizes_in_bytes
                }
                SettingsField::DestinationFolder => {}
            }
        }
        other => {
            if ctx.settings.field == SettingsField::DestinationFolder {
                edit_text(&mut ctx.settings.destination_folder, other);
            }
        }
    }
    Ok(())
}

// The folder is stored exactly as typed; it is sanitized when used.
fn save_settings(ctx: &mut SettingsContext) {
    ctx.config.set_destination_policy(&DestinationPolicy {
        default_folder: ctx.settings.destination_folder.clone(),
        ask_each_time: ctx.settings.ask_folder_before_download,
    });
    ctx.config.ui.show_sizes_in_bytes = ctx.settings.show_sizes_in_bytes;
    ctx.services.apply_config(ctx.config);

    *ctx.notice = Some(match ctx.config.save() {
        Ok(()) => Notice::Info("Settings saved.".to_string()),
        Err(e) => {
            warn!(error = %e, "settings not saved");
            Notice::error(&e)
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_edit_fields() {
        let mut draft = SettingsDraft::default();
        let config = Config::default();
        let (mut services, _rx) = Services::new(&config).unwrap();
        let mut config = config;
        let mut notice = None;
        let mut mode = AppMode::Settings;

        let keys = [
            KeyCode::Char('/'),
            KeyCode::Char('m'),
            KeyCode::Char('/'),
            KeyCode::Down,
            KeyCode::Char(' '),
            KeyCode::Esc,
        ];
        for key in keys {
            let mut ctx = SettingsContext {
                services: &mut services,
                config: &mut config,
                settings: &mut draft,
                notice: &mut notice,
                mode: &mut mode,
            };
            handle_settings_key(&mut ctx, key).unwrap();
        }

        assert_eq!(draft.destination_folder, "/m/");
        assert!(draft.ask_folder_before_download);
        assert_eq!(draft.field, SettingsField::AskFolder);
        assert_eq!(mode, AppMode::VideoList);
        // Esc leaves the stored config alone.
        assert!(!config.download.ask_folder_before_download);
        assert!(notice.is_none());
    }
}
