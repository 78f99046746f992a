//! Supplier entity model and DTOs.

use procura_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::double_option;

/// A supplier row from the `suppliers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Supplier {
    pub id: DbId,
    pub name: String,
    pub tax_id: String,
    pub address_id: DbId,
    pub bank_details: String,
    pub delivery_time: String,
    pub payment_condition_id: DbId,
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new supplier.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSupplier {
    pub name: String,
    pub tax_id: String,
    pub address_id: DbId,
    pub bank_details: String,
    pub delivery_time: String,
    pub payment_condition_id: DbId,
    pub currency: String,
    pub notes: Option<String>,
}

/// DTO for updating an existing supplier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSupplier {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub address_id: Option<DbId>,
    pub bank_details: Option<String>,
    pub delivery_time: Option<String>,
    pub payment_condition_id: Option<DbId>,
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}
