//! Gemini client error types.

use thiserror::Error;

pub type GeminiResult<T> = Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Gemini API returned {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("No content in Gemini response")]
    EmptyResponse,

    #[error("Malformed structured response: {0}")]
    MalformedResponse(String),

    #[error("Remote file entered FAILED state")]
    FileFailed,

    #[error("File activation timed out after {attempts} polls")]
    ActivationTimeout { attempts: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeminiError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}
