//! Error types shared by the assistant core, the provider client and the proxy.

use thiserror::Error;

/// Errors produced while assembling, issuing or streaming a generation request.
#[derive(Error, Debug)]
pub enum AssistError {
    /// User input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The generation endpoint answered with a non-success status.
    ///
    /// The message is the status text, e.g. `Service Unavailable`.
    #[error("{status_text}")]
    Request { status: u16, status_text: String },

    /// The response body failed while it was being read.
    #[error("Stream error: {0}")]
    Stream(String),

    /// The endpoint could not be reached at all.
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Missing or inconsistent configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssistError {
    /// Builds a request error from an HTTP status, using its canonical reason phrase.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Request {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        }
    }

    /// Returns the HTTP status carried by a request error.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias for assistant operations.
pub type Result<T> = std::result::Result<T, AssistError>;
