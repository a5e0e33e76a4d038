//! Top-level API error type.

use super::{AuthError, ClientError, ConfigError, ValidationError};
use thiserror::Error;

/// Fallback message when the backend rejects a call without explaining why.
pub(crate) const DEFAULT_FAILURE_MESSAGE: &str = "API request failed";

/// Top-level error type for all registry operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use windspire_lib::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Auth(e) => eprintln!("Please sign in again: {e}"),
///         ApiError::Failure { message } => eprintln!("Backend refused: {message}"),
///         other => eprintln!("Request failed: {other}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport errors and non-success HTTP statuses.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Response bodies that could not be decoded into the expected type.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Authentication failures, including forced logout on `401`.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Client configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The backend answered `2xx` with `success: false` in the envelope.
    #[error("{message}")]
    Failure {
        /// The envelope's `message`, or a generic fallback.
        message: String,
    },
}

impl ApiError {
    /// Builds an envelope-level failure, substituting the generic fallback
    /// when the backend sent no message.
    pub(crate) fn failure(message: Option<String>) -> Self {
        Self::Failure {
            message: message.unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        }
    }

    /// Returns `true` when the call failed because the session is no longer valid.
    pub fn is_authentication_required(&self) -> bool {
        matches!(self, Self::Auth(AuthError::AuthenticationRequired))
    }

    /// Returns the HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(e) => e.status_code(),
            Self::Auth(AuthError::AuthenticationRequired) => Some(401),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client_error() {
        let client_err = ClientError::HttpStatus {
            status: 404,
            message: "Boat not found".to_string(),
        };
        let api_err: ApiError = client_err.into();
        assert!(matches!(api_err, ApiError::Client(_)));
        assert_eq!(api_err.status_code(), Some(404));
    }

    #[test]
    fn test_failure_uses_fallback() {
        let err = ApiError::failure(None);
        assert_eq!(err.to_string(), "API request failed");
    }

    #[test]
    fn test_failure_keeps_backend_message() {
        let err = ApiError::failure(Some("Boat name already taken".to_string()));
        assert_eq!(err.to_string(), "Boat name already taken");
    }

    #[test]
    fn test_authentication_required() {
        let err: ApiError = AuthError::AuthenticationRequired.into();
        assert!(err.is_authentication_required());
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.to_string(), "Authentication required");
    }
}
