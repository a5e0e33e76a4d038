use tracing::info;

use crate::client::ApiClient;
use crate::error::{ApiError, AuthError};
use crate::identity::ProviderCredential;
use crate::types::{CurrentUser, ExchangeRequest, RefreshRequest, RefreshedToken, SessionGrant};

/// Bridges identity-provider credentials to a backend session.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Trades a provider ID token for a backend session token.
    ///
    /// On success the session token is stored and observers are notified.
    pub async fn exchange(&self, credential: &ProviderCredential) -> Result<SessionGrant, ApiError> {
        let grant: SessionGrant = self
            .client
            .post(
                "/auth/firebase",
                &ExchangeRequest {
                    id_token: &credential.id_token,
                },
            )
            .await?;

        self.client.start_session(&grant.token)?;
        info!(user_id = %grant.user.id, "Signed in");
        Ok(grant)
    }

    /// The profile behind the stored session token.
    pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        self.client.get("/auth/me").await
    }

    /// Swaps the stored session token for a fresh one and returns it.
    ///
    /// ## Errors
    ///
    /// Returns `AuthError::MissingToken` without sending anything when no
    /// session token is stored.
    pub async fn refresh(&self) -> Result<String, ApiError> {
        let current = self
            .client
            .token_store()
            .token()
            .ok_or(AuthError::MissingToken)?;

        let refreshed: RefreshedToken = self
            .client
            .post(
                "/auth/refresh",
                &RefreshRequest {
                    refresh_token: &current,
                },
            )
            .await?;

        self.client.start_session(&refreshed.access_token)?;
        Ok(refreshed.access_token)
    }

    /// Ends the session locally. The backend keeps no session state, so no
    /// request is sent.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.end_session()?;
        info!("Signed out");
        Ok(())
    }
}
