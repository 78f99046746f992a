//! Project entity model and DTOs.

use procura_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::double_option;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub number: String,
    pub name: String,
    pub description: Option<String>,
    pub date: Timestamp,
    pub state_id: DbId,
    pub responsible_id: Option<DbId>,
    pub client_id: Option<DbId>,
    pub budget_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub number: String,
    pub name: String,
    pub description: Option<String>,
    /// Defaults to the current time if omitted.
    pub date: Option<Timestamp>,
    pub state_id: DbId,
    pub responsible_id: Option<DbId>,
    pub client_id: Option<DbId>,
    pub budget_id: Option<DbId>,
}

/// DTO for updating an existing project. Optional references accept an
/// explicit `null` to detach.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub number: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub date: Option<Timestamp>,
    pub state_id: Option<DbId>,
    #[serde(default, deserialize_with = "double_option")]
    pub responsible_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub budget_id: Option<Option<DbId>>,
}
