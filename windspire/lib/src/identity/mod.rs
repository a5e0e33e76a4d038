//! Identity-provider boundary.
//!
//! The registry backend does not check passwords itself. A user signs in
//! with an identity provider, and the resulting ID token is exchanged for a
//! backend session through [`AuthApi::exchange`](crate::resources::AuthApi::exchange).
//! This module defines the provider capability and a REST adapter for
//! Firebase Authentication.

mod error;
mod firebase;

pub use error::ProviderError;
pub use firebase::{
    FIREBASE_API_KEY_ENV, FIREBASE_IDENTITY_URL_ENV, FIREBASE_TOKEN_URL_ENV, FirebaseConfig,
    FirebaseRestProvider,
};

/// How the user proves who they are.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Google OAuth popup. Only available where a browser can host it.
    Google,
    /// Existing account, email and password.
    EmailPassword { email: String, password: String },
    /// New account. Creating it also sends a verification email.
    SignUp {
        email: String,
        password: String,
        display_name: Option<String>,
    },
}

impl AuthMethod {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::EmailPassword { .. } => "Email/password",
            Self::SignUp { .. } => "Sign-up",
        }
    }
}

impl std::fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => f.write_str("Google"),
            Self::EmailPassword { email, .. } => f
                .debug_struct("EmailPassword")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            Self::SignUp {
                email,
                display_name,
                ..
            } => f
                .debug_struct("SignUp")
                .field("email", email)
                .field("password", &"<redacted>")
                .field("display_name", display_name)
                .finish(),
        }
    }
}

/// What a successful provider sign-in yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCredential {
    /// Short-lived provider ID token, the input to the backend exchange.
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// The provider's user id.
    pub local_id: String,
    pub email_verified: bool,
}

/// An identity provider the registry trusts.
///
/// Uses native async functions in traits; implementations must be
/// `Send + Sync` so one provider can serve concurrent sign-ins.
///
/// ## Examples
///
/// ```ignore
/// use windspire_lib::identity::{AuthMethod, IdentityProvider};
///
/// let credential = provider
///     .authenticate(AuthMethod::EmailPassword {
///         email: "jane@example.com".into(),
///         password: "secret".into(),
///     })
///     .await?;
/// client.auth().exchange(&credential).await?;
/// ```
pub trait IdentityProvider: Send + Sync {
    /// Signs the user in (or up) and returns their credential.
    ///
    /// ## Errors
    ///
    /// Returns `ProviderError::Rejected` with a user-facing message when the
    /// provider refuses the attempt, and `ProviderError::Unsupported` for
    /// methods this provider cannot run.
    fn authenticate(
        &self,
        method: AuthMethod,
    ) -> impl std::future::Future<Output = Result<ProviderCredential, ProviderError>> + Send;

    /// Emails a password-reset link to `email`.
    fn send_password_reset(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send;

    /// Emails a verification link to the account behind `id_token`.
    fn send_email_verification(
        &self,
        id_token: &str,
    ) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send;

    /// Trades a provider refresh token for a fresh ID token.
    fn refresh_id_token(
        &self,
        refresh_token: &str,
    ) -> impl std::future::Future<Output = Result<ProviderCredential, ProviderError>> + Send;
}
