//! Article entity model and DTOs.

use procura_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::double_option;

/// An article row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub requirement_id: Option<DbId>,
    pub requirement_consecutive: Option<i32>,
    pub quantity: Decimal,
    pub unit: String,
    pub brand: String,
    pub model: String,
    pub dimensions: String,
    pub state_id: DbId,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new article.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticle {
    pub requirement_id: Option<DbId>,
    pub requirement_consecutive: Option<i32>,
    pub quantity: Decimal,
    pub unit: String,
    pub brand: String,
    pub model: String,
    pub dimensions: String,
    pub state_id: DbId,
    pub notes: Option<String>,
}

/// DTO for updating an existing article.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArticle {
    #[serde(default, deserialize_with = "double_option")]
    pub requirement_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub requirement_consecutive: Option<Option<i32>>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub dimensions: Option<String>,
    pub state_id: Option<DbId>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}
