//! Data-transfer objects exchanged with the registry backend.
//!
//! These are plain records. Validation is the backend's job; the client only
//! guarantees the JSON shape. Inbound records accept both the camelCase
//! spellings of the web contract and the backend's snake_case columns.

mod auth;
mod boat;
mod country;
mod owner;
mod pagination;

pub use auth::{CurrentUser, ExchangeRequest, RefreshRequest, RefreshedToken, SessionGrant, SessionUser};
pub use boat::{Boat, BoatCreate, BoatUpdate, BoatWithOwners};
pub use country::Country;
pub use owner::Owner;
pub use pagination::{PaginatedResult, PaginationParams};
