//! Client entity model, DTOs, and the aggregate overview types.

use procura_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A client row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub name: String,
}

/// DTO for updating an existing client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClient {
    pub name: Option<String>,
}

/// Trimmed project row for the client overview.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
    pub number: String,
    pub date: Timestamp,
    pub state_id: DbId,
}

/// Trimmed contact row for the client overview.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactSummary {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
}

/// Trimmed budget row for the client overview.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BudgetSummary {
    pub id: DbId,
    pub name: String,
    pub delivery_date: Timestamp,
    pub contact_id: DbId,
}

/// A client together with bounded, newest-first slices of its related
/// collections.
#[derive(Debug, Clone, Serialize)]
pub struct ClientOverview {
    #[serde(flatten)]
    pub client: Client,
    pub latest_projects: Vec<ProjectSummary>,
    pub latest_contacts: Vec<ContactSummary>,
    pub latest_budgets: Vec<BudgetSummary>,
}
