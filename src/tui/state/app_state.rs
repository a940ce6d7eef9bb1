use crate::config::Config;
use crate::model::VideoDescriptor;
use crate::selection::SelectionState;
use crate::tui::service::Services;
use crate::tui::state::{AppMessage, AppMode, DownloadProgress, Notice, SettingsDraft};
use anyhow::Result;
use ratatui::widgets::ListState;
use std::sync::mpsc::Receiver;

pub struct App {
    pub config: Config,
    pub selection: SelectionState,
    pub list_state: ListState,
    pub mode: AppMode,
    pub prev_mode: Option<AppMode>,
    pub should_quit: bool,
    pub url_input: String,
    pub filter_input: String,
    pub folder_input: String,
    /// Videos waiting on the folder prompt.
    pub pending_dispatch: Vec<VideoDescriptor>,
    pub settings: SettingsDraft,
    pub notice: Option<Notice>,
    pub downloads: DownloadProgress,
    pub services: Services,
    pub receiver: Receiver<AppMessage>,
}

impl App {
    pub fn new(config: Config, url: Option<String>) -> Result<Self> {
        let (services, receiver) = Services::new(&config)?;

        Ok(Self {
            config,
            selection: SelectionState::new(),
            list_state: ListState::default(),
            mode: AppMode::UrlInput,
            prev_mode: None,
            should_quit: false,
            url_input: url.unwrap_or_default(),
            filter_input: String::new(),
            folder_input: String::new(),
            pending_dispatch: Vec::new(),
            settings: SettingsDraft::default(),
            notice: None,
            downloads: DownloadProgress::default(),
            services,
            receiver,
        })
    }
}
