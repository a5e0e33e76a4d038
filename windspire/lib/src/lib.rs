//! Typed client for the Windspire boat registry.
//!
//! The `windspire_lib` crate wraps the registry's JSON API: every backend
//! response arrives in a `{success, data, message}` envelope, and every call
//! carries the user's session token as a bearer header.
//!
//! ## Features
//!
//! - **Envelope client**: [`ApiClient`] unwraps envelopes, normalizes empty
//!   bodies, and maps failures to layered errors
//! - **Session lifecycle**: an injected [`TokenStore`] holds the token; a
//!   `401` clears it and fires an [`AuthChanged`] notification
//! - **Resource callers**: boats, users, countries and the session exchange
//! - **Identity provider**: a Firebase Authentication REST adapter behind the
//!   [`IdentityProvider`](identity::IdentityProvider) trait
//!
//! ## Example
//!
//! ```rust,ignore
//! use windspire_lib::{ApiClient, ClientConfig, PaginationParams};
//!
//! let client = ApiClient::builder_from(&ClientConfig::from_env()?).build()?;
//! let page = client.boats().get_boats(PaginationParams::new(1, 20)).await?;
//! for boat in page.data {
//!     println!("{} ({} owners)", boat.name, boat.owners.map_or(0, |o| o.len()));
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod method;
pub mod resources;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use client::{ApiClient, ApiClientBuilder, Envelope};
pub use config::ClientConfig;
pub use error::{ApiError, AuthError, ClientError, ConfigError, ValidationError};
pub use method::RestMethod;
pub use resources::{AuthApi, BoatsApi, CountriesApi, UserSearch, UsersApi};
pub use session::{AuthChanged, AuthEvents, FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{
    Boat, BoatCreate, BoatUpdate, BoatWithOwners, Country, CurrentUser, Owner, PaginatedResult,
    PaginationParams, SessionGrant, SessionUser,
};
