//! Shared model for the lookup/state tables.
//!
//! ProjectState, RequirementState, ArticleState, OrderStatus and
//! ArticleOrderStatus all have the same shape: a named, ordered,
//! activatable classification. One model serves all five tables; the
//! generic repository ([`crate::repositories::StateRepo`]) supplies the
//! table-specific pieces.

use procura_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::double_option;

/// A row from one of the state/status lookup tables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct State {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new state.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateState {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to 0 if omitted.
    pub sort_order: Option<i32>,
    /// Defaults to `true` if omitted.
    pub active: Option<bool>,
}

/// DTO for updating an existing state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateState {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub sort_order: Option<i32>,
    pub active: Option<bool>,
}
