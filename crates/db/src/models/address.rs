//! Address entity model and DTOs.

use procura_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::double_option;

/// An address row from the `addresses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Address {
    pub id: DbId,
    pub street: String,
    pub exterior_number: String,
    pub interior_number: Option<String>,
    pub neighborhood: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new address.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAddress {
    pub street: String,
    pub exterior_number: String,
    pub interior_number: Option<String>,
    pub neighborhood: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub notes: Option<String>,
}

/// DTO for updating an existing address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAddress {
    pub street: Option<String>,
    pub exterior_number: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub interior_number: Option<Option<String>>,
    pub neighborhood: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}
