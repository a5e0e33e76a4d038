use serde::de::IgnoredAny;
use tracing::debug;

use super::with_query;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Boat, BoatCreate, BoatUpdate, BoatWithOwners, PaginatedResult, PaginationParams};

/// Calls on `/boats`.
#[derive(Debug, Clone, Copy)]
pub struct BoatsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BoatsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Lists boats one page at a time, owners included.
    ///
    /// The backend answers with `{boat, owners}` records; each is flattened
    /// into a [`Boat`] whose `owners` holds the record's owner list in order.
    pub async fn get_boats(&self, params: PaginationParams) -> Result<PaginatedResult<Boat>, ApiError> {
        let mut pairs = params.query_pairs();
        pairs.push(("include", "owners".to_string()));
        let path = with_query("/boats", pairs);

        let page: PaginatedResult<BoatWithOwners> = self.client.get(&path).await?;
        Ok(page.map(BoatWithOwners::into_boat))
    }

    /// Boats owned by the signed-in user.
    pub async fn get_my_boats(&self) -> Result<Vec<Boat>, ApiError> {
        self.client.get("/boats/my").await
    }

    pub async fn get_boat(&self, id: &str) -> Result<Boat, ApiError> {
        self.client.get(&format!("/boats/{id}")).await
    }

    pub async fn create_boat(&self, boat: &BoatCreate) -> Result<Boat, ApiError> {
        self.client.post("/boats", boat).await
    }

    pub async fn update_boat(&self, id: &str, boat: &BoatUpdate) -> Result<Boat, ApiError> {
        self.client.put(&format!("/boats/{id}"), boat).await
    }

    pub async fn delete_boat(&self, id: &str) -> Result<(), ApiError> {
        let _: IgnoredAny = self.client.delete(&format!("/boats/{id}")).await?;
        Ok(())
    }

    /// Links an existing user to a boat as a co-owner.
    pub async fn add_owner(&self, boat_id: &str, owner_id: &str) -> Result<(), ApiError> {
        debug!(boat_id, owner_id, "Adding owner to boat");
        let _: IgnoredAny = self
            .client
            .post(&format!("/boats/{boat_id}/owners/{owner_id}"), &serde_json::json!({}))
            .await?;
        Ok(())
    }

    pub async fn remove_owner(&self, boat_id: &str, owner_id: &str) -> Result<(), ApiError> {
        debug!(boat_id, owner_id, "Removing owner from boat");
        let _: IgnoredAny = self
            .client
            .delete(&format!("/boats/{boat_id}/owners/{owner_id}"))
            .await?;
        Ok(())
    }
}
