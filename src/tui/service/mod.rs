pub mod downloads;
pub mod scanner;

use crate::config::Config;
use crate::scanner::build_client;
use crate::tui::state::AppMessage;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;
use tokio::runtime::Runtime;

/// Background IO for the TUI: a tokio runtime, one shared HTTP client and
/// the sending half of the channel the UI loop drains every frame.
pub struct Services {
    runtime: Runtime,
    client: reqwest::Client,
    sender: Sender<AppMessage>,
    timeout: Duration,
    probe_concurrency: usize,
    downloads_root: PathBuf,
}

impl Services {
    pub fn new(config: &Config) -> Result<(Self, Receiver<AppMessage>)> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let client = build_client(&config.scan)?;
        let (sender, receiver) = channel();

        let services = Self {
            runtime,
            client,
            sender,
            timeout: Duration::from_secs(config.scan.timeout_secs.max(1)),
            probe_concurrency: config.scan.size_probe_concurrency.max(1),
            downloads_root: config.downloads_root(),
        };
        Ok((services, receiver))
    }

    pub fn downloads_root(&self) -> &PathBuf {
        &self.downloads_root
    }

    /// Picks up settings that changed while the app was running.
    pub fn apply_config(&mut self, config: &Config) {
        self.downloads_root = config.downloads_root();
    }
}
