//! Order entity model and DTOs, including the composite
//! order-with-articles payloads.

use procura_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::article_order::ArticleOrder;
use crate::models::double_option;

/// An order row from the `orders` table.
///
/// `address` and `bank_details` are free-text snapshots taken at order
/// time; `shipping_address_id` is the structured reference.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub supplier_id: DbId,
    pub address: String,
    pub bank_details: String,
    pub date: Timestamp,
    pub delivery_time: String,
    pub payment_condition_id: DbId,
    pub currency: String,
    pub supplier_reference: Option<String>,
    pub acceptance_id: Option<DbId>,
    pub requested_by_id: Option<DbId>,
    pub reviewed_by_id: Option<DbId>,
    pub approved_by_id: Option<DbId>,
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub shipping_address_id: DbId,
    pub status_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub supplier_id: DbId,
    pub address: String,
    pub bank_details: String,
    /// Defaults to the current time if omitted.
    pub date: Option<Timestamp>,
    pub delivery_time: String,
    pub payment_condition_id: DbId,
    pub currency: String,
    pub supplier_reference: Option<String>,
    pub acceptance_id: Option<DbId>,
    pub requested_by_id: Option<DbId>,
    pub reviewed_by_id: Option<DbId>,
    pub approved_by_id: Option<DbId>,
    pub subtotal: Decimal,
    pub vat: Decimal,
    /// Defaults to 0 if omitted.
    pub discount: Option<Decimal>,
    pub total: Decimal,
    pub notes: Option<String>,
    pub shipping_address_id: DbId,
    pub status_id: DbId,
}

/// DTO for updating an existing order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrder {
    pub supplier_id: Option<DbId>,
    pub address: Option<String>,
    pub bank_details: Option<String>,
    pub date: Option<Timestamp>,
    pub delivery_time: Option<String>,
    pub payment_condition_id: Option<DbId>,
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub supplier_reference: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub acceptance_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub requested_by_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub reviewed_by_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub approved_by_id: Option<Option<DbId>>,
    pub subtotal: Option<Decimal>,
    pub vat: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub total: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    pub shipping_address_id: Option<DbId>,
    pub status_id: Option<DbId>,
}

/// A line payload inside a composite order create; the order reference is
/// filled in by the builder. `position` is the caller-visible line number.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderArticle {
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

/// Composite payload: one order plus its line items, created as a single
/// atomic unit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderWithArticles {
    pub order: CreateOrder,
    pub articles: Vec<CreateOrderArticle>,
}

/// Result of a composite create: the order and its lines in submission
/// order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithArticles {
    pub order: Order,
    pub articles: Vec<ArticleOrder>,
}
