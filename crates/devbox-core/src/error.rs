//! Error types for devbox-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for devbox-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// HTTP status the transport reports when a long-lived request timed out.
pub const REQUEST_TIMEOUT: u16 = 408;

/// Errors that can occur while preparing an upload.
#[derive(Debug, Error)]
pub enum CoreError {
    /// I/O error while walking the upload root
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Upload root is missing or not a directory
    #[error("invalid upload root: {0}")]
    InvalidRoot(PathBuf),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Walk produced more entries than the configured limit
    #[error("upload exceeds {limit} entries")]
    TooManyEntries {
        /// Configured entry limit
        limit: usize,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An error that may carry an HTTP status code.
///
/// The stream reconnector uses this to tell a transient request timeout
/// apart from every other failure.
pub trait HttpStatus {
    /// The HTTP status attached to this error, if any.
    fn status(&self) -> Option<u16>;

    /// True if this error is a request timeout (408).
    fn is_timeout(&self) -> bool {
        self.status() == Some(REQUEST_TIMEOUT)
    }
}

/// Error returned by the remote API transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", display_api_error(.status, .message))]
pub struct ApiError {
    /// HTTP status, absent for connection-level failures.
    pub status: Option<u16>,
    /// Human readable message.
    pub message: String,
}

impl ApiError {
    /// Create an error carrying an HTTP status.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create an error without a status (e.g. connection reset).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

impl HttpStatus for ApiError {
    fn status(&self) -> Option<u16> {
        self.status
    }
}

fn display_api_error(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("API error {code}: {message}"),
        None => format!("API error: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_timeout() {
        let err = ApiError::with_status(408, "request timeout");
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "API error 408: request timeout");
    }

    #[test]
    fn test_api_error_without_status() {
        let err = ApiError::new("connection reset");
        assert!(!err.is_timeout());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "API error: connection reset");
    }

    #[test]
    fn test_core_error_display() {
        let err = CoreError::TooManyEntries { limit: 10 };
        assert_eq!(err.to_string(), "upload exceeds 10 entries");
    }
}
