//! Budget entity model and DTOs.

use procura_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A budget row from the `budgets` table.
///
/// The contact must belong to the budget's client; both repositories
/// enforce the agreement on every write.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Budget {
    pub id: DbId,
    pub number: i32,
    pub name: String,
    pub client_id: DbId,
    pub contact_id: DbId,
    pub delivery_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new budget.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBudget {
    pub number: i32,
    pub name: String,
    pub client_id: DbId,
    pub contact_id: DbId,
    pub delivery_date: Timestamp,
}

/// DTO for updating an existing budget.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBudget {
    pub number: Option<i32>,
    pub name: Option<String>,
    pub client_id: Option<DbId>,
    pub contact_id: Option<DbId>,
    pub delivery_date: Option<Timestamp>,
}
