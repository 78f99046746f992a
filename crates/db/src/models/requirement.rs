//! Requirement entity model and DTOs, including the composite
//! requirement-with-articles payloads.

use procura_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::article::Article;
use crate::models::double_option;

/// A requirement row from the `requirements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Requirement {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub request_date: Timestamp,
    pub requested_by: Option<DbId>,
    pub state_id: DbId,
    pub closing_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new requirement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequirement {
    pub project_id: Option<DbId>,
    /// Defaults to the current time if omitted.
    pub request_date: Option<Timestamp>,
    pub requested_by: Option<DbId>,
    pub state_id: DbId,
    pub closing_date: Option<Timestamp>,
}

/// DTO for updating an existing requirement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRequirement {
    #[serde(default, deserialize_with = "double_option")]
    pub project_id: Option<Option<DbId>>,
    pub request_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "double_option")]
    pub requested_by: Option<Option<DbId>>,
    pub state_id: Option<DbId>,
    #[serde(default, deserialize_with = "double_option")]
    pub closing_date: Option<Option<Timestamp>>,
}

/// An article payload inside a composite requirement create; the
/// requirement reference is filled in by the builder.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequirementArticle {
    pub quantity: Decimal,
    pub unit: String,
    pub brand: String,
    pub model: String,
    pub dimensions: String,
    pub state_id: DbId,
    pub notes: Option<String>,
}

/// Composite payload: one requirement plus its articles, created as a
/// single atomic unit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequirementWithArticles {
    pub requirement: CreateRequirement,
    pub articles: Vec<CreateRequirementArticle>,
}

/// Result of a composite create: the requirement and its articles in
/// submission order.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementWithArticles {
    pub requirement: Requirement,
    pub articles: Vec<Article>,
}
