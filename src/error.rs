use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VidError {
    #[error("Please enter a URL.")]
    EmptyUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Please select at least one video to download.")]
    EmptySelection,

    #[error("Download cancelled.")]
    PromptCancelled,

    #[error("Scan failed: {0}")]
    Scan(String),

    #[error("Download failed for {url}: {message}")]
    Download { url: String, message: String },

    #[error("Could not save settings: {0}")]
    Persistence(String),
}

impl VidError {
    /// Errors the user can fix by changing input; shown inline, never fatal.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            VidError::EmptyUrl | VidError::InvalidUrl(_) | VidError::EmptySelection
        )
    }
}
