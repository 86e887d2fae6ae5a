//! Error types for media intake.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Invalid Google Drive URL: {0}")]
    InvalidDriveUrl(String),

    #[error("Download failed: {message}")]
    DownloadFailed { message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create a download failure error.
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }

    /// Create an invalid-URL error.
    pub fn invalid_drive_url(url: impl Into<String>) -> Self {
        Self::InvalidDriveUrl(url.into())
    }
}
