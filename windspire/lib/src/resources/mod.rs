//! Thin resource callers over [`ApiClient`].
//!
//! Each caller borrows the client, builds a path and query string, and
//! forwards to the envelope client. None of them hold state of their own.

mod auth;
mod boats;
mod countries;
mod users;

pub use auth::AuthApi;
pub use boats::BoatsApi;
pub use countries::CountriesApi;
pub use users::{UserSearch, UsersApi};

use url::form_urlencoded;

use crate::client::ApiClient;

impl ApiClient {
    /// Boat registry calls.
    pub fn boats(&self) -> BoatsApi<'_> {
        BoatsApi::new(self)
    }

    /// User directory calls.
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    /// Country lookups.
    pub fn countries(&self) -> CountriesApi<'_> {
        CountriesApi::new(self)
    }

    /// Session exchange and lifecycle calls.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }
}

/// Appends `pairs` to `path` as a query string, leaving `path` alone when
/// there is nothing to append.
pub(crate) fn with_query<K, V>(path: &str, pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut empty = true;
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
        empty = false;
    }

    if empty {
        path.to_string()
    } else {
        format!("{path}?{}", serializer.finish())
    }
}
