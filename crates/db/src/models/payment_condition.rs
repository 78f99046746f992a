//! Payment condition entity model and DTOs.

use procura_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::double_option;

/// A payment condition row from the `payment_conditions` table.
///
/// `text` is the contractual wording printed on orders.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentCondition {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub text: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new payment condition.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentCondition {
    pub name: String,
    pub description: Option<String>,
    pub text: String,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

/// DTO for updating an existing payment condition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePaymentCondition {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub text: Option<String>,
    pub active: Option<bool>,
}
