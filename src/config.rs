use crate::error::VidError;
use crate::model::DestinationPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "vidscout";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Stored as entered; sanitized when a download is dispatched.
    #[serde(default)]
    pub destination_folder: String,
    #[serde(default)]
    pub ask_folder_before_download: bool,
    /// Where downloads land. Defaults to the platform download directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads_root: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_size_probe_concurrency")]
    pub size_probe_concurrency: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_size_probe_concurrency() -> usize {
    6
}

fn default_user_agent() -> String {
    format!("vidscout/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            size_probe_concurrency: default_size_probe_concurrency(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub show_sizes_in_bytes: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<(), VidError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), VidError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| VidError::Persistence(e.to_string()))?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| VidError::Persistence(e.to_string()))?;
        fs::write(path, content).map_err(|e| VidError::Persistence(e.to_string()))?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn downloads_root(&self) -> PathBuf {
        match self.download.downloads_root.as_deref().map(str::trim) {
            Some(root) if !root.is_empty() => PathBuf::from(root),
            _ => dirs::download_dir()
                .or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn destination_policy(&self) -> DestinationPolicy {
        DestinationPolicy {
            default_folder: self.download.destination_folder.clone(),
            ask_each_time: self.download.ask_folder_before_download,
        }
    }

    pub fn set_destination_policy(&mut self, policy: &DestinationPolicy) {
        self.download.destination_folder = policy.default_folder.clone();
        self.download.ask_folder_before_download = policy.ask_each_time;
    }

    /// Applies a `config set` style key/value pair.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "destination_folder" => self.download.destination_folder = value.to_string(),
            "ask_folder_before_download" => {
                self.download.ask_folder_before_download = parse_bool(value)?
            }
            "downloads_root" => {
                self.download.downloads_root = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.trim().to_string())
                }
            }
            "timeout_secs" => self.scan.timeout_secs = value.parse()?,
            "size_probe_concurrency" => self.scan.size_probe_concurrency = value.parse()?,
            "user_agent" => self.scan.user_agent = value.to_string(),
            "show_sizes_in_bytes" => self.ui.show_sizes_in_bytes = parse_bool(value)?,
            _ => anyhow::bail!(
                "Unknown key: {}. Available keys: {}",
                key,
                Self::KEYS.join(", ")
            ),
        }
        Ok(())
    }

    pub const KEYS: &'static [&'static str] = &[
        "destination_folder",
        "ask_folder_before_download",
        "downloads_root",
        "timeout_secs",
        "size_probe_concurrency",
        "user_agent",
        "show_sizes_in_bytes",
    ];
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => anyhow::bail!("Expected true or false, got '{}'", other),
    }
}
