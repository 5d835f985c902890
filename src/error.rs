//! Error types for the review console.

use thiserror::Error;

/// Result type alias for review console operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the review console.
#[derive(Error, Debug)]
pub enum Error {
    // ===== Service Errors =====
    #[error("API error: {status} {status_text} - {message}")]
    Api {
        status: u16,
        status_text: String,
        message: String,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Analysis decode error: {0}")]
    Decode(String),

    // ===== Input Errors =====
    #[error("Empty code: nothing to submit for review")]
    EmptyCode,

    // ===== I/O Errors =====
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ===== Internal Errors =====
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse failure classification surfaced alongside the session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service could not be reached.
    Transport,
    /// The service answered with a non-success status.
    Status,
    /// A stored result arrived but its payload did not decode.
    Decode,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Status => write!(f, "status"),
            Self::Decode => write!(f, "decode"),
        }
    }
}

impl Error {
    /// Create an API error from HTTP response details.
    pub fn api(status: u16, status_text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            status_text: status_text.into(),
            message: message.into(),
        }
    }

    /// Check if this error is transient: a failed fetch that is worth
    /// re-issuing on the next poll tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }

    /// Classify this error for the session phase. Anything that is neither
    /// a transport nor a status failure is reported as a decode failure.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Http(_) | Self::Io(_) => FailureKind::Transport,
            Self::Api { .. } => FailureKind::Status,
            _ => FailureKind::Decode,
        }
    }
}
