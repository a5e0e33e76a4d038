//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] struct, which sends requests to the
//! registry backend, attaches the session token, and unwraps the response
//! envelope.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::{Span, instrument};
use url::Url;

use super::envelope;
use crate::config::ClientConfig;
use crate::error::{ApiError, AuthError, ClientError, ConfigError};
use crate::method::RestMethod;
use crate::session::{AuthChanged, AuthEvents, MemoryTokenStore, TokenStore};

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    store: Option<Arc<dyn TokenStore>>,
    events: Option<AuthEvents>,
}

impl ApiClientBuilder {
    fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout: None,
            store: None,
            events: None,
        }
    }

    /// Sets a per-request deadline. Without one, requests wait as long as the
    /// transport does.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets where the session token is kept. Defaults to a fresh
    /// [`MemoryTokenStore`].
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use windspire_lib::{ApiClient, FileTokenStore};
    ///
    /// let client = ApiClient::builder("http://localhost:8080/api")
    ///     .token_store(Arc::new(FileTokenStore::new("/tmp/windspire_token")))
    ///     .build()?;
    /// ```
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Shares an existing notification channel instead of creating one.
    pub fn events(mut self, events: AuthEvents) -> Self {
        self.events = Some(events);
        self
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ConfigError::invalid_url(base_url.clone(), e))?;

        let mut http = reqwest::Client::builder().pool_max_idle_per_host(10);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http
            .build()
            .map_err(|e| ClientError::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(ApiClient {
            http,
            base_url,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryTokenStore::new())),
            events: self.events.unwrap_or_default(),
        })
    }
}

/// Async client for the registry API.
///
/// Every call goes to `base_url + path`, carries `Content-Type:
/// application/json` and, when the token store holds one, `Authorization:
/// Bearer <token>`. Successful responses are unwrapped from the
/// `{success, data, message}` envelope; a `401` clears the stored token and
/// fires one [`AuthChanged`] notification.
///
/// ## Examples
///
/// ```rust,ignore
/// use windspire_lib::{ApiClient, Boat};
///
/// let client = ApiClient::new("http://localhost:8080/api")?;
/// let boat: Boat = client.get("/boats/42").await?;
/// println!("{}", boat.name);
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    events: AuthEvents,
}

impl ApiClient {
    /// Creates a builder for a client talking to `base_url`.
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url.into())
    }

    /// Creates a builder pre-filled from a [`ClientConfig`].
    pub fn builder_from(config: &ClientConfig) -> ApiClientBuilder {
        let builder = Self::builder(config.base_url.clone());
        match config.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    /// Creates a client with an in-memory token store and no timeout.
    ///
    /// ## Errors
    ///
    /// Returns an error if the base URL does not parse.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::builder(base_url).build()
    }

    /// Returns the base URL every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the token store backing this client's session.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Returns the session notification channel.
    pub fn events(&self) -> &AuthEvents {
        &self.events
    }

    /// Subscribes to session changes fired by this client.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthChanged> {
        self.events.subscribe()
    }

    /// Returns `true` when a session token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.store.token().is_some()
    }

    /// Stores a new session token and notifies observers.
    ///
    /// ## Errors
    ///
    /// Returns `AuthError::TokenStore` if the token cannot be persisted.
    pub fn start_session(&self, token: &str) -> Result<(), ApiError> {
        self.store.set_token(token)?;
        self.events.notify();
        Ok(())
    }

    /// Removes the session token and notifies observers.
    ///
    /// ## Errors
    ///
    /// Returns `AuthError::TokenStore` if the token cannot be removed.
    pub fn end_session(&self) -> Result<(), ApiError> {
        self.store.clear_token()?;
        self.events.notify();
        Ok(())
    }

    /// Sends `GET base_url + path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(path, RestMethod::Get, None).await
    }

    /// Sends `POST base_url + path` with `body` as JSON.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, RestMethod::Post, Some(body)).await
    }

    /// Sends `PUT base_url + path` with `body` as JSON.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, RestMethod::Put, Some(body)).await
    }

    /// Sends `DELETE base_url + path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(path, RestMethod::Delete, None).await
    }

    /// Sends a request and unwraps the response envelope.
    ///
    /// ## Type Parameters
    ///
    /// * `T` - The envelope's `data` type. Use `()`, `Option<_>` or
    ///   `serde::de::IgnoredAny` for endpoints that may answer with an empty body.
    /// * `B` - The JSON request body type.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The request cannot be sent (`ClientError::Request`)
    /// - The server answers `401` (`AuthError::AuthenticationRequired`, after
    ///   clearing the stored token)
    /// - The server answers any other non-success status (`ClientError::HttpStatus`)
    /// - The envelope reports `success: false` (`ApiError::Failure`)
    /// - The payload does not match `T` (`ApiError::Validation`)
    #[instrument(
        name = "api_request",
        skip(self, body),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn request<T, B>(
        &self,
        path: &str,
        method: RestMethod,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Span::current().record("http.method", method.to_string().as_str());
        let url = self.url_for(path)?;
        Span::current().record("http.url", url.as_str());

        let mut request = self
            .http
            .request(method.to_reqwest(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.store.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "API request failed");
            ClientError::Request(e)
        })?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            return Err(self.error_for(response).await);
        }

        Span::current().record("otel.status_code", "OK");

        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok());
        if envelope::declares_empty(content_length) {
            tracing::debug!("Empty response declared by Content-Length");
            return envelope::void();
        }

        let text = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read response body");
            ClientError::Request(e)
        })?;

        envelope::unwrap_body(&text)
    }

    fn url_for(&self, path: &str) -> Result<Url, ConfigError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ConfigError::invalid_url(raw, e))
    }

    /// Turns a non-success response into the matching error, expiring the
    /// session on `401`.
    async fn error_for(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();
        let code = status.as_u16();

        let otel_status = if status.is_server_error() {
            "ERROR"
        } else {
            "UNSET"
        };
        Span::current().record("otel.status_code", otel_status);

        let text = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return AuthError::AuthenticationRequired.into();
        }

        let message = envelope::error_message(code, &text);
        tracing::error!(status = code, %message, "API error");
        ClientError::HttpStatus {
            status: code,
            message,
        }
        .into()
    }

    fn expire_session(&self) {
        tracing::warn!("Backend rejected the session token; signing out");
        if let Err(e) = self.store.clear_token() {
            tracing::warn!(error = %e, "Failed to clear session token");
        }
        self.events.notify();
    }
}
