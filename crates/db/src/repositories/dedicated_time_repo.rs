//! Repository for the `dedicated_times` table.
//!
//! Dedicated-time entries are a leaf entity: nothing references them, so
//! deletes need no dependent-usage guard.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, ReferenceCheck};
use crate::models::dedicated_time::{CreateDedicatedTime, DedicatedTime, UpdateDedicatedTime};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, report_id, time_secs, created_at, updated_at";

/// Provides CRUD operations for dedicated-time entries.
pub struct DedicatedTimeRepo;

impl DedicatedTimeRepo {
    /// Insert a new dedicated-time entry, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDedicatedTime) -> DbResult<DedicatedTime> {
        let mut tx = pool.begin().await?;

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::required("user_id", "users", input.user_id),
                ReferenceCheck::required("report_id", "reports", input.report_id),
            ],
        )
        .await?;

        let query = format!(
            "INSERT INTO dedicated_times (user_id, report_id, time_secs)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, DedicatedTime>(&query)
            .bind(input.user_id)
            .bind(input.report_id)
            .bind(input.time_secs)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(entry)
    }

    /// Find a dedicated-time entry by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<DedicatedTime>> {
        let query = format!("SELECT {COLUMNS} FROM dedicated_times WHERE id = $1");
        let entry = sqlx::query_as::<_, DedicatedTime>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(entry)
    }

    /// List all dedicated-time entries ordered by most recently created
    /// first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<DedicatedTime>> {
        let query = format!("SELECT {COLUMNS} FROM dedicated_times ORDER BY created_at DESC");
        let entries = sqlx::query_as::<_, DedicatedTime>(&query)
            .fetch_all(pool)
            .await?;
        Ok(entries)
    }

    /// Update a dedicated-time entry. Provided references are
    /// re-validated.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDedicatedTime,
    ) -> DbResult<DedicatedTime> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM dedicated_times WHERE id = $1");
        let exists = sqlx::query_as::<_, DedicatedTime>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DbError::not_found("DedicatedTime", id));
        }

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::optional("user_id", "users", input.user_id),
                ReferenceCheck::optional("report_id", "reports", input.report_id),
            ],
        )
        .await?;

        let query = format!(
            "UPDATE dedicated_times SET
                user_id    = COALESCE($2, user_id),
                report_id  = COALESCE($3, report_id),
                time_secs  = COALESCE($4, time_secs),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, DedicatedTime>(&query)
            .bind(id)
            .bind(input.user_id)
            .bind(input.report_id)
            .bind(input.time_secs)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(entry)
    }

    /// Delete a dedicated-time entry.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM dedicated_times WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("DedicatedTime", id));
        }
        Ok(())
    }
}
