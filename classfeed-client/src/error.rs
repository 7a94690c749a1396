//! Error types for the Classfeed client

use classfeed_core::domain::submission::InvalidInput;
use classfeed_core::dto::error::ErrorBody;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced to the presentation layer
///
/// `Display` is the single message meant to be shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Rejected input, either before sending or by the service (HTTP 422)
    #[error("{0}")]
    Validation(String),

    /// The service was reached but refused the request
    #[error("{message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Message from the service, or a per-operation fallback
        message: String,
    },

    /// The request could not complete or the response was unreadable
    #[error("{0}")]
    Transport(String),

    /// The service accepted the job but failed to process it
    #[error("{0}")]
    Processing(String),

    /// Polling was cancelled before the job reached a terminal state
    #[error("Polling was cancelled")]
    Cancelled,

    /// Polling gave up after the configured ceiling
    #[error("Gave up waiting for processing after {0:?}")]
    TimedOut(Duration),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Discriminant of [`ClientError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Remote,
    Transport,
    Processing,
    Cancelled,
    TimedOut,
    Internal,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Remote { .. } => ErrorKind::Remote,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Processing(_) => ErrorKind::Processing,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::TimedOut(_) => ErrorKind::TimedOut,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Classify a non-success response.
    ///
    /// # Arguments
    /// * `status` - HTTP status code
    /// * `body` - Raw response body
    /// * `fallback` - Message used when the body carries none
    pub fn from_response_body(status: u16, body: &str, fallback: &str) -> Self {
        let parsed = ErrorBody::parse(body);

        if status == 422 {
            if let Some(message) = parsed.as_ref().and_then(ErrorBody::validation_message) {
                return Self::Validation(message);
            }
        }

        Self::Remote {
            status,
            message: parsed
                .and_then(|b| b.message())
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// HTTP status, for errors that came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote { status: 404, .. })
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Transport(format!("Failed to parse response: {}", err))
        } else {
            Self::Transport(format!("HTTP request failed: {}", err))
        }
    }
}

impl From<InvalidInput> for ClientError {
    fn from(err: InvalidInput) -> Self {
        Self::Validation(format!("Validation error: {}", err))
    }
}
