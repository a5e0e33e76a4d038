//! Firebase Authentication over its REST API.
//!
//! Email/password sign-up and sign-in go through the Identity Toolkit
//! `accounts:*` endpoints; ID-token refresh goes through the secure-token
//! service. Each call is one HTTPS request authenticated with the project's
//! Web API key, passed as the `key` query parameter.
//!
//! ## Configuration
//!
//! Set `WINDSPIRE_FIREBASE_API_KEY` to the project's Web API key.
//! `WINDSPIRE_FIREBASE_IDENTITY_URL` and `WINDSPIRE_FIREBASE_TOKEN_URL`
//! point the provider elsewhere, e.g. at the Firebase Auth emulator.

use std::env;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use tracing::{Span, debug, instrument};
use url::Url;

use super::{AuthMethod, IdentityProvider, ProviderCredential, ProviderError};
use crate::error::ConfigError;

/// Environment variable holding the Firebase Web API key.
pub const FIREBASE_API_KEY_ENV: &str = "WINDSPIRE_FIREBASE_API_KEY";

/// Environment variable overriding the Identity Toolkit base URL.
pub const FIREBASE_IDENTITY_URL_ENV: &str = "WINDSPIRE_FIREBASE_IDENTITY_URL";

/// Environment variable overriding the secure-token base URL.
pub const FIREBASE_TOKEN_URL_ENV: &str = "WINDSPIRE_FIREBASE_TOKEN_URL";

const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Where and how to reach Firebase Authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    api_key: String,
    identity_url: String,
    token_url: String,
}

impl FirebaseConfig {
    /// Creates a configuration for the production Firebase endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    /// Reads the API key and optional endpoint overrides from the environment.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::MissingEnv` if `WINDSPIRE_FIREBASE_API_KEY` is
    /// unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = non_blank_env(FIREBASE_API_KEY_ENV).ok_or(ConfigError::MissingEnv {
            name: FIREBASE_API_KEY_ENV,
        })?;

        let mut config = Self::new(api_key);
        if let Some(url) = non_blank_env(FIREBASE_IDENTITY_URL_ENV) {
            config = config.identity_url(url);
        }
        if let Some(url) = non_blank_env(FIREBASE_TOKEN_URL_ENV) {
            config = config.token_url(url);
        }
        Ok(config)
    }

    /// Overrides the Identity Toolkit base URL (the part before `/accounts:...`).
    pub fn identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the secure-token base URL (the part before `/token`).
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl std::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("api_key", &"<redacted>")
            .field("identity_url", &self.identity_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdateRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id_token: Option<&'a str>,
}

#[derive(Serialize)]
struct RefreshTokenRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

/// Shape shared by the `accounts:*` responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

impl AccountResponse {
    fn into_credential(self) -> Result<ProviderCredential, ProviderError> {
        let id_token = self
            .id_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProviderError::InvalidResponse("response carried no idToken".to_string()))?;

        Ok(ProviderCredential {
            id_token,
            refresh_token: self.refresh_token,
            email: self.email,
            display_name: self.display_name.filter(|n| !n.is_empty()),
            local_id: self.local_id,
            email_verified: self.email_verified,
        })
    }
}

/// The secure-token service answers in snake_case.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: String,
    refresh_token: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Turns a Firebase error body into a [`ProviderError`].
///
/// Firebase reports `{"error": {"message": "CODE"}}`, sometimes with a
/// detail appended as `"CODE : detail"`.
fn rejection(status: u16, text: &str) -> ProviderError {
    match serde_json::from_str::<ErrorResponse>(text) {
        Ok(body) => {
            let raw = body.error.message;
            let code = raw.split(" : ").next().unwrap_or_default().trim().to_string();
            ProviderError::from_code(code, raw)
        }
        Err(_) => ProviderError::InvalidResponse(format!("status {status}: {text}")),
    }
}

/// [`IdentityProvider`] backed by the Firebase Authentication REST API.
#[derive(Debug, Clone)]
pub struct FirebaseRestProvider {
    http: reqwest::Client,
    config: FirebaseConfig,
}

impl FirebaseRestProvider {
    /// Creates a provider for `config`.
    ///
    /// ## Errors
    ///
    /// Returns `ProviderError::Config` if a configured endpoint is not a URL.
    pub fn new(config: FirebaseConfig) -> Result<Self, ProviderError> {
        for url in [&config.identity_url, &config.token_url] {
            Url::parse(url).map_err(|e| ConfigError::invalid_url(url.clone(), e))?;
        }

        Ok(Self {
            http: reqwest::Client::new(),
            config,
        })
    }

    /// Creates a provider from `WINDSPIRE_FIREBASE_*` environment variables.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(FirebaseConfig::from_env()?)
    }

    fn endpoint(&self, base: &str, name: &str) -> Result<Url, ProviderError> {
        let raw = format!("{base}/{name}");
        let mut url = Url::parse(&raw).map_err(|e| ConfigError::invalid_url(raw, e))?;
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        Ok(url)
    }

    fn accounts(&self, action: &str) -> Result<Url, ProviderError> {
        self.endpoint(&self.config.identity_url, &format!("accounts:{action}"))
    }

    /// Posts `body` and decodes the reply, mapping Firebase error bodies.
    ///
    /// The URL carries the API key, so only the endpoint name is traced.
    #[instrument(
        name = "identity_request",
        skip(self, url, body),
        fields(http.status_code = tracing::field::Empty, otel.kind = "client")
    )]
    async fn call<B, T>(&self, endpoint: &str, url: Url, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());
        let text = response.text().await?;

        if !status.is_success() {
            let err = rejection(status.as_u16(), &text);
            debug!(error = %err, "Identity provider refused request");
            return Err(err);
        }

        serde_json::from_str(&text).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderCredential, ProviderError> {
        let account: AccountResponse = self
            .call(
                "signInWithPassword",
                self.accounts("signInWithPassword")?,
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        account.into_credential()
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<ProviderCredential, ProviderError> {
        let account: AccountResponse = self
            .call(
                "signUp",
                self.accounts("signUp")?,
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        let mut credential = account.into_credential()?;

        if let Some(name) = display_name.filter(|n| !n.trim().is_empty()) {
            let updated: AccountResponse = self
                .call(
                    "update",
                    self.accounts("update")?,
                    &ProfileUpdateRequest {
                        id_token: &credential.id_token,
                        display_name: name,
                        return_secure_token: true,
                    },
                )
                .await?;
            debug!(display_name = name, "Updated provider profile");

            if let Some(token) = updated.id_token.filter(|t| !t.is_empty()) {
                credential.id_token = token;
            }
            if updated.refresh_token.is_some() {
                credential.refresh_token = updated.refresh_token;
            }
            credential.display_name = updated.display_name.or_else(|| Some(name.to_string()));
        }

        self.send_email_verification(&credential.id_token).await?;
        Ok(credential)
    }
}

impl IdentityProvider for FirebaseRestProvider {
    async fn authenticate(&self, method: AuthMethod) -> Result<ProviderCredential, ProviderError> {
        debug!(method = method.name(), "Authenticating with Firebase");
        match method {
            AuthMethod::Google => Err(ProviderError::Unsupported { method: "Google" }),
            AuthMethod::EmailPassword { email, password } => self.sign_in(&email, &password).await,
            AuthMethod::SignUp {
                email,
                password,
                display_name,
            } => self.sign_up(&email, &password, display_name.as_deref()).await,
        }
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        let _: IgnoredAny = self
            .call(
                "sendOobCode",
                self.accounts("sendOobCode")?,
                &OobCodeRequest {
                    request_type: "PASSWORD_RESET",
                    email: Some(email),
                    id_token: None,
                },
            )
            .await?;
        Ok(())
    }

    async fn send_email_verification(&self, id_token: &str) -> Result<(), ProviderError> {
        let _: IgnoredAny = self
            .call(
                "sendOobCode",
                self.accounts("sendOobCode")?,
                &OobCodeRequest {
                    request_type: "VERIFY_EMAIL",
                    email: None,
                    id_token: Some(id_token),
                },
            )
            .await?;
        Ok(())
    }

    async fn refresh_id_token(&self, refresh_token: &str) -> Result<ProviderCredential, ProviderError> {
        let tokens: TokenResponse = self
            .call(
                "token",
                self.endpoint(&self.config.token_url, "token")?,
                &RefreshTokenRequest {
                    grant_type: "refresh_token",
                    refresh_token,
                },
            )
            .await?;

        Ok(ProviderCredential {
            id_token: tokens.id_token,
            refresh_token: Some(tokens.refresh_token),
            email: None,
            display_name: None,
            local_id: tokens.user_id,
            email_verified: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            env::remove_var(FIREBASE_API_KEY_ENV);
            env::remove_var(FIREBASE_IDENTITY_URL_ENV);
            env::remove_var(FIREBASE_TOKEN_URL_ENV);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        clear_env();
        let err = FirebaseConfig::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingEnv {
                name: FIREBASE_API_KEY_ENV
            }
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        clear_env();
        unsafe {
            env::set_var(FIREBASE_API_KEY_ENV, "web-key");
            env::set_var(FIREBASE_IDENTITY_URL_ENV, "http://127.0.0.1:9099/identitytoolkit.googleapis.com/v1/");
        }

        let config = FirebaseConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.api_key, "web-key");
        assert_eq!(
            config.identity_url,
            "http://127.0.0.1:9099/identitytoolkit.googleapis.com/v1"
        );
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let rendered = format!("{:?}", FirebaseConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_endpoint_carries_key() {
        let provider = FirebaseRestProvider::new(FirebaseConfig::new("k1")).unwrap();
        assert_eq!(
            provider.accounts("signUp").unwrap().as_str(),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=k1"
        );
    }

    #[test]
    fn test_rejection_strips_detail() {
        let err = rejection(
            400,
            r#"{"error": {"code": 400, "message": "WEAK_PASSWORD : Password should be at least 6 characters"}}"#,
        );
        assert_eq!(err.code(), Some("WEAK_PASSWORD"));
        assert_eq!(err.to_string(), "Password should be at least 6 characters long.");
    }

    #[test]
    fn test_rejection_non_json() {
        let err = rejection(503, "upstream unavailable");
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
