//! Identity-provider errors.

use thiserror::Error;

use crate::error::ConfigError;

/// Errors raised while talking to the identity provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider refused the request. `message` is user-facing.
    #[error("{message}")]
    Rejected {
        /// The provider's error code, e.g. `EMAIL_EXISTS`.
        code: String,
        /// A readable explanation of `code`, or the provider's own text.
        message: String,
    },

    /// The sign-in method cannot run outside a browser.
    #[error("{method} sign-in requires a browser and is not supported here")]
    Unsupported { method: &'static str },

    /// The provider could not be reached.
    #[error("Identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with something other than the documented shape.
    #[error("Unexpected identity provider response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ProviderError {
    /// Builds a rejection from a provider error code, translating the codes
    /// users can act on.
    ///
    /// Unknown codes keep `raw_message` as their text.
    pub fn from_code(code: impl Into<String>, raw_message: impl Into<String>) -> Self {
        let code = code.into();
        let message = describe_code(&code)
            .map(str::to_string)
            .unwrap_or_else(|| raw_message.into());
        Self::Rejected { code, message }
    }

    /// Returns the provider error code, if the provider sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }
}

fn describe_code(code: &str) -> Option<&'static str> {
    let message = match code {
        "EMAIL_EXISTS" => "An account with this email already exists. Please sign in instead.",
        "INVALID_EMAIL" => "Please enter a valid email address.",
        "WEAK_PASSWORD" => "Password should be at least 6 characters long.",
        "OPERATION_NOT_ALLOWED" => {
            "Email/password authentication is not enabled. Please enable it in the Firebase Console."
        }
        "EMAIL_NOT_FOUND" => "No account found with this email. Please sign up first.",
        "INVALID_PASSWORD" => "Incorrect password. Please try again.",
        "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password. Please check your credentials and try again."
        }
        "USER_DISABLED" => "This account has been disabled. Please contact support.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many failed attempts. Please try again later.",
        _ => return None,
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_are_translated() {
        let cases = [
            ("INVALID_EMAIL", "Please enter a valid email address."),
            ("WEAK_PASSWORD", "Password should be at least 6 characters long."),
            ("EMAIL_NOT_FOUND", "No account found with this email. Please sign up first."),
            ("INVALID_PASSWORD", "Incorrect password. Please try again."),
            ("USER_DISABLED", "This account has been disabled. Please contact support."),
            ("TOO_MANY_ATTEMPTS_TRY_LATER", "Too many failed attempts. Please try again later."),
        ];

        for (code, expected) in cases {
            let err = ProviderError::from_code(code, code);
            assert_eq!(err.to_string(), expected, "code {code}");
            assert_eq!(err.code(), Some(code));
        }
    }

    #[test]
    fn test_unknown_code_keeps_raw_message() {
        let err = ProviderError::from_code("QUOTA_EXCEEDED", "QUOTA_EXCEEDED : Project quota hit");
        assert_eq!(err.to_string(), "QUOTA_EXCEEDED : Project quota hit");
    }

    #[test]
    fn test_unsupported_display() {
        let err = ProviderError::Unsupported { method: "Google" };
        assert_eq!(
            err.to_string(),
            "Google sign-in requires a browser and is not supported here"
        );
        assert_eq!(err.code(), None);
    }
}
