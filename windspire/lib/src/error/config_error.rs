//! Client configuration errors.

use thiserror::Error;

/// Errors in client configuration, typically raised before any request is sent.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL joined with the request path is not a valid URL.
    #[error("Invalid URL: {url}: {source}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// The underlying parse failure.
        source: url::ParseError,
    },

    /// A required environment variable is not set.
    #[error("Missing environment variable: {name}")]
    MissingEnv {
        /// The name of the variable.
        name: &'static str,
    },

    /// An environment variable is set but cannot be interpreted.
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv {
        /// The name of the variable.
        name: &'static str,
        /// The offending value.
        value: String,
    },
}

impl ConfigError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url() {
        let parse_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::invalid_url("not-a-url/boats", parse_err);
        let display = err.to_string();
        assert!(display.contains("Invalid URL"));
        assert!(display.contains("not-a-url/boats"));
    }

    #[test]
    fn test_missing_env() {
        let err = ConfigError::MissingEnv {
            name: "WINDSPIRE_FIREBASE_API_KEY",
        };
        assert_eq!(
            err.to_string(),
            "Missing environment variable: WINDSPIRE_FIREBASE_API_KEY"
        );
    }
}
