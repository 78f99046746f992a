//! Article-order (order line) entity model and DTOs.

use procura_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::double_option;

/// An order line row from the `article_orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleOrder {
    pub id: DbId,
    pub order_id: DbId,
    pub article_id: Option<DbId>,
    pub status_id: DbId,
    pub position: i32,
    pub quantity: Decimal,
    pub unit: String,
    pub brand: String,
    pub model: String,
    pub unit_price: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new order line directly (outside a composite
/// create).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticleOrder {
    pub order_id: DbId,
    pub article_id: Option<DbId>,
    pub status_id: DbId,
    pub position: i32,
    pub quantity: Decimal,
    pub unit: String,
    pub brand: String,
    pub model: String,
    pub unit_price: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
}

/// DTO for updating an existing order line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArticleOrder {
    pub order_id: Option<DbId>,
    #[serde(default, deserialize_with = "double_option")]
    pub article_id: Option<Option<DbId>>,
    pub status_id: Option<DbId>,
    pub position: Option<i32>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub unit_price: Option<Decimal>,
    pub total: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}
