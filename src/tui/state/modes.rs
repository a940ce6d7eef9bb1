#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    UrlInput,
    VideoList,
    FilterInput,
    FolderPrompt,
    Settings,
    Help,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SettingsField {
    #[default]
    DestinationFolder,
    AskFolder,
    ShowBytes,
}

impl SettingsField {
    pub fn next(self) -> Self {
        match self {
            SettingsField::DestinationFolder => SettingsField::AskFolder,
            SettingsField::AskFolder => SettingsField::ShowBytes,
            SettingsField::ShowBytes => SettingsField::DestinationFolder,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SettingsField::DestinationFolder => SettingsField::ShowBytes,
            SettingsField::AskFolder => SettingsField::DestinationFolder,
            SettingsField::ShowBytes => SettingsField::AskFolder,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SettingsField::DestinationFolder => "Destination folder",
            SettingsField::AskFolder => "Ask for folder before download",
            SettingsField::ShowBytes => "Show sizes in bytes",
        }
    }
}
