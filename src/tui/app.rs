use crate::tui::state::App;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;

use crate::tui::controller::common::HelpContext;
use crate::tui::controller::filter_input::FilterInputContext;
use crate::tui::controller::folder_prompt::FolderPromptContext;
use crate::tui::controller::settings::SettingsContext;
use crate::tui::controller::url_input::UrlInputContext;
use crate::tui::controller::video_list::VideoListContext;
use crate::tui::controller::{
    handle_filter_input_key, handle_folder_prompt_key, handle_help_key, handle_settings_key,
    handle_url_input_key, handle_video_list_key,
};
use crate::tui::service::scanner::{poll_messages, start_scan, PollContext, ScanStartParams};
use crate::tui::state::AppMode;
use crate::tui::view::components::modal::{
    render_folder_prompt, render_help_modal, render_settings_modal, FolderPromptData,
};
use crate::tui::view::{render_url_input, render_video_list, VideoListData};

impl App {
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        // A URL from the command line scans right away.
        if !self.url_input.trim().is_empty() {
            let mut params = ScanStartParams {
                services: &self.services,
                url_input: &self.url_input,
                selection: &mut self.selection,
                list_state: &mut self.list_state,
                notice: &mut self.notice,
                mode: &mut self.mode,
            };
            start_scan(&mut params);
        }

        while !self.should_quit {
            self.poll();

            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn poll(&mut self) {
        let mut ctx = PollContext {
            receiver: &self.receiver,
            selection: &mut self.selection,
            list_state: &mut self.list_state,
            notice: &mut self.notice,
            downloads: &mut self.downloads,
        };
        poll_messages(&mut ctx);
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match self.mode {
            AppMode::UrlInput => {
                let mut ctx = UrlInputContext {
                    services: &self.services,
                    url_input: &mut self.url_input,
                    filter_input: &mut self.filter_input,
                    selection: &mut self.selection,
                    list_state: &mut self.list_state,
                    notice: &mut self.notice,
                    mode: &mut self.mode,
                    should_quit: &mut self.should_quit,
                };
                handle_url_input_key(&mut ctx, code)
            }
            AppMode::VideoList => {
                let mut ctx = VideoListContext {
                    services: &self.services,
                    config: &self.config,
                    selection: &mut self.selection,
                    list_state: &mut self.list_state,
                    mode: &mut self.mode,
                    prev_mode: &mut self.prev_mode,
                    should_quit: &mut self.should_quit,
                    url_input: &self.url_input,
                    filter_input: &mut self.filter_input,
                    folder_input: &mut self.folder_input,
                    pending_dispatch: &mut self.pending_dispatch,
                    settings: &mut self.settings,
                    notice: &mut self.notice,
                    downloads: &mut self.downloads,
                };
                handle_video_list_key(&mut ctx, code)
            }
            AppMode::FilterInput => {
                let mut ctx = FilterInputContext {
                    filter_input: &mut self.filter_input,
                    selection: &mut self.selection,
                    list_state: &mut self.list_state,
                    mode: &mut self.mode,
                };
                handle_filter_input_key(&mut ctx, code)
            }
            AppMode::FolderPrompt => {
                let mut ctx = FolderPromptContext {
                    services: &self.services,
                    folder_input: &mut self.folder_input,
                    pending_dispatch: &mut self.pending_dispatch,
                    downloads: &mut self.downloads,
                    notice: &mut self.notice,
                    mode: &mut self.mode,
                };
                handle_folder_prompt_key(&mut ctx, code)
            }
            AppMode::Settings => {
                let mut ctx = SettingsContext {
                    services: &mut self.services,
                    config: &mut self.config,
                    settings: &mut self.settings,
                    notice: &mut self.notice,
                    mode: &mut self.mode,
                };
                handle_settings_key(&mut ctx, code)
            }
            AppMode::Help => {
                let mut ctx = HelpContext {
                    mode: &mut self.mode,
                    prev_mode: &mut self.prev_mode,
                };
                handle_help_key(&mut ctx, code)
            }
        }
    }

    fn render(&mut self, f: &mut ratatui::Frame) {
        if self.mode == AppMode::UrlInput {
            render_url_input(f, &self.url_input, self.notice.as_ref());
            return;
        }

        let mut data = VideoListData {
            list_state: &mut self.list_state,
            selection: &self.selection,
            url_input: &self.url_input,
            filter_input: &self.filter_input,
            filter_editing: self.mode == AppMode::FilterInput,
            notice: self.notice.as_ref(),
            downloads: &self.downloads,
            show_bytes: self.config.ui.show_sizes_in_bytes,
        };
        render_video_list(f, &mut data);

        match self.mode {
            AppMode::FolderPrompt => {
                let root = self.services.downloads_root().display().to_string();
                render_folder_prompt(
                    f,
                    &FolderPromptData {
                        input: &self.folder_input,
                        video_count: self.pending_dispatch.len(),
                        downloads_root: &root,
                    },
                );
            }
            AppMode::Settings => render_settings_modal(f, &self.settings),
            AppMode::Help => render_help_modal(f),
            _ => {}
        }
    }
}
