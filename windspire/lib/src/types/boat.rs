use serde::{Deserialize, Serialize};

use super::Owner;

/// A registered boat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boat {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, alias = "sail_number", skip_serializing_if = "Option::is_none")]
    pub sail_number: Option<String>,
    #[serde(alias = "country_id")]
    pub country_id: String,
    /// Present only when the listing was requested with owners included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owners: Option<Vec<Owner>>,
}

/// Raw list record returned by `GET /boats?include=owners`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoatWithOwners {
    pub boat: Boat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owners: Option<Vec<Owner>>,
}

impl BoatWithOwners {
    /// Folds the owners list into the boat record. A record without an
    /// `owners` key yields a boat without one.
    pub fn into_boat(self) -> Boat {
        Boat {
            owners: self.owners,
            ..self.boat
        }
    }
}

/// Payload for `POST /boats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoatCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sail_number: Option<String>,
    pub country_id: String,
}

/// Payload for `PUT /boats/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoatUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sail_number: Option<String>,
    pub country_id: String,
}
