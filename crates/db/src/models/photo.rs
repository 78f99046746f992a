//! Photo entity model and DTOs.
//!
//! Rows carry storage paths only; the file store itself lives outside
//! this service.

use procura_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A photo row from the `photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub path: String,
    pub thumbnail: String,
    pub report_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new photo record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhoto {
    pub path: String,
    pub thumbnail: String,
    pub report_id: DbId,
}
