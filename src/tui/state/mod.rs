pub mod app_state;
pub mod modes;
pub mod scan;

pub use app_state::App;
pub use modes::{AppMode, SettingsField};
pub use scan::{AppMessage, DownloadProgress, Notice, SettingsDraft};
