//! The HTTP envelope client.
//!
//! [`ApiClient`] is the single seam between the crate and the network: it
//! owns the base URL, attaches the session token, and turns every response
//! into either the caller's type or an [`ApiError`](crate::ApiError).

mod envelope;
mod executor;

pub use envelope::Envelope;
pub use executor::{ApiClient, ApiClientBuilder};
