//! Session state shared between the client and its observers.
//!
//! The session is a single bearer token kept in a [`TokenStore`], plus an
//! [`AuthEvents`] channel that announces every change to it. The client reads
//! the token on each request and clears it itself when the backend answers
//! `401`; interested observers (a UI, a route guard, the CLI) subscribe to
//! the channel instead of polling the store.

mod events;
mod store;

pub use events::{AuthChanged, AuthEvents};
pub use store::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore};
