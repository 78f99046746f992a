//! Dedicated-time entity model and DTOs: time a user booked on a report.

use procura_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A dedicated-time row from the `dedicated_times` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DedicatedTime {
    pub id: DbId,
    pub user_id: DbId,
    pub report_id: DbId,
    pub time_secs: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new dedicated-time entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDedicatedTime {
    pub user_id: DbId,
    pub report_id: DbId,
    pub time_secs: i64,
}

/// DTO for updating an existing dedicated-time entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDedicatedTime {
    pub user_id: Option<DbId>,
    pub report_id: Option<DbId>,
    pub time_secs: Option<i64>,
}
