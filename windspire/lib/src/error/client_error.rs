//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the HTTP transport layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, refused connection, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success status other than `401`.
    #[error("{message}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// Message extracted from the response body, or the status fallback.
        message: String,
    },

    /// The request could not be assembled (bad header value, unbuildable client).
    #[error("Connection failed: {0}")]
    Connection(String),
}

impl ClientError {
    /// Builds the generic message used when an error body carries nothing useful.
    pub fn status_fallback(status: u16) -> String {
        format!("HTTP error! status: {status}")
    }

    /// Returns the HTTP status code if this is an HTTP status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Connection(_) => None,
        }
    }

    /// Returns `true` when the failure happened before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}
