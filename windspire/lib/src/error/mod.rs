//! Layered error types for the registry client.
//!
//! The error hierarchy mirrors the ways a call can go wrong:
//! - [`ApiError`] - Top-level error type returned by every client operation
//! - [`ClientError`] - Transport failures and non-success HTTP statuses
//! - [`ValidationError`] - Response bodies that cannot be decoded
//! - [`AuthError`] - Session and identity-provider failures
//! - [`ConfigError`] - Base URL and environment configuration errors

mod api_error;
mod auth_error;
mod client_error;
mod config_error;
mod validation_error;

pub use api_error::ApiError;
pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;
