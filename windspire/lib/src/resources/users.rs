use tracing::warn;

use super::with_query;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Owner, PaginationParams};

/// How many users a search fetches before filtering locally.
const SEARCH_FETCH_LIMIT: u32 = 100;

/// Outcome of [`UsersApi::search_users`].
///
/// A failed fetch is not an error to the caller: it reads as "no matches",
/// but the reason stays available for logging or display.
#[derive(Debug, Clone, PartialEq)]
pub enum UserSearch {
    Matches(Vec<Owner>),
    Unavailable { reason: String },
}

impl UserSearch {
    /// The matching users; empty when the search could not run.
    pub fn matches(&self) -> &[Owner] {
        match self {
            Self::Matches(users) => users.as_slice(),
            Self::Unavailable { .. } => &[],
        }
    }

    pub fn into_matches(self) -> Vec<Owner> {
        match self {
            Self::Matches(users) => users,
            Self::Unavailable { .. } => Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Matches(_))
    }
}

/// Calls on `/users`.
#[derive(Debug, Clone, Copy)]
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_users(&self, params: PaginationParams) -> Result<Vec<Owner>, ApiError> {
        let path = with_query("/users", params.query_pairs());
        self.client.get(&path).await
    }

    pub async fn get_user(&self, id: &str) -> Result<Owner, ApiError> {
        self.client.get(&format!("/users/{id}")).await
    }

    /// Finds users whose first name, last name or email contains `query`,
    /// ignoring case. A blank query returns every fetched user.
    ///
    /// Filtering happens client-side over the first
    /// [`SEARCH_FETCH_LIMIT`] users.
    pub async fn search_users(&self, query: &str) -> UserSearch {
        match self.get_users(PaginationParams::limit(SEARCH_FETCH_LIMIT)).await {
            Ok(users) => UserSearch::Matches(filter_users(users, query)),
            Err(e) => {
                warn!(error = %e, "User search unavailable");
                UserSearch::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn filter_users(users: Vec<Owner>, query: &str) -> Vec<Owner> {
    if query.trim().is_empty() {
        return users;
    }

    let needle = query.to_lowercase();
    users
        .into_iter()
        .filter(|user| user.matches_lowercase(&needle))
        .collect()
}
