//! Session and identity-provider errors.

use thiserror::Error;

use crate::identity::ProviderError;

/// Errors related to the user's session.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend answered `401`; the stored session token has been cleared.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// An operation needed a session token but none is stored.
    #[error("No session token is stored")]
    MissingToken,

    /// The token store could not be read or written.
    #[error("Token store error: {0}")]
    TokenStore(String),

    /// The identity provider rejected the sign-in attempt.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AuthError {
    /// Returns `true` if signing in again could resolve this error.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, Self::AuthenticationRequired | Self::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_required_display() {
        assert_eq!(
            AuthError::AuthenticationRequired.to_string(),
            "Authentication required"
        );
    }

    #[test]
    fn test_requires_sign_in() {
        assert!(AuthError::AuthenticationRequired.requires_sign_in());
        assert!(AuthError::MissingToken.requires_sign_in());
        assert!(!AuthError::TokenStore("disk full".to_string()).requires_sign_in());
    }

    #[test]
    fn test_provider_error_is_transparent() {
        let err: AuthError = ProviderError::from_code("EMAIL_EXISTS", "EMAIL_EXISTS").into();
        assert_eq!(
            err.to_string(),
            "An account with this email already exists. Please sign in instead."
        );
    }
}
