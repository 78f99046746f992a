//! Report entity model and DTOs.

use procura_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::double_option;

/// A report row from the `reports` table.
///
/// Elapsed times are stored as whole seconds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub duration_secs: i64,
    pub dead_time_secs: i64,
    pub dead_time_cause: Option<String>,
    pub project_id: Option<DbId>,
    pub responsible_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new report.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReport {
    pub title: String,
    pub description: String,
    pub duration_secs: i64,
    pub dead_time_secs: i64,
    pub dead_time_cause: Option<String>,
    pub project_id: Option<DbId>,
    pub responsible_id: Option<DbId>,
}

/// DTO for updating an existing report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReport {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_secs: Option<i64>,
    pub dead_time_secs: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub dead_time_cause: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub project_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub responsible_id: Option<Option<DbId>>,
}
