//! Client configuration sourced from the environment.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the API base URL.
pub const API_BASE_URL_ENV: &str = "WINDSPIRE_API_BASE_URL";

/// Environment variable holding an optional request timeout in seconds.
pub const API_TIMEOUT_ENV: &str = "WINDSPIRE_API_TIMEOUT_SECS";

/// Base URL used when nothing is configured: the local development backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Settings for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix every request path is appended to, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    /// Optional per-request deadline handed to the transport. `None` means no deadline.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given base URL with no timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Reads the configuration from `WINDSPIRE_API_BASE_URL` and
    /// `WINDSPIRE_API_TIMEOUT_SECS`.
    ///
    /// A missing or blank base URL falls back to [`DEFAULT_API_BASE_URL`].
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::InvalidEnv` if the timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var(API_BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout = match env::var(API_TIMEOUT_ENV) {
            Ok(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                    name: API_TIMEOUT_ENV,
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self { base_url, timeout })
    }
}
