//! Repository for the `photos` table.
//!
//! Photos are a leaf entity and immutable once recorded: create, read
//! and delete only. The image files themselves live outside this
//! service; rows carry storage paths.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, ReferenceCheck};
use crate::models::photo::{CreatePhoto, Photo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, path, thumbnail, report_id, created_at, updated_at";

/// Provides operations for photo records.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a new photo record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePhoto) -> DbResult<Photo> {
        let mut tx = pool.begin().await?;

        integrity::assert_references(
            &mut tx,
            &[ReferenceCheck::required("report_id", "reports", input.report_id)],
        )
        .await?;

        let query = format!(
            "INSERT INTO photos (path, thumbnail, report_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let photo = sqlx::query_as::<_, Photo>(&query)
            .bind(&input.path)
            .bind(&input.thumbnail)
            .bind(input.report_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(photo)
    }

    /// Find a photo by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Photo>> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1");
        let photo = sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(photo)
    }

    /// List all photos ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Photo>> {
        let query = format!("SELECT {COLUMNS} FROM photos ORDER BY created_at DESC");
        let photos = sqlx::query_as::<_, Photo>(&query).fetch_all(pool).await?;
        Ok(photos)
    }

    /// List the photos attached to one report.
    pub async fn list_by_report(pool: &PgPool, report_id: DbId) -> DbResult<Vec<Photo>> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE report_id = $1 ORDER BY id");
        let photos = sqlx::query_as::<_, Photo>(&query)
            .bind(report_id)
            .fetch_all(pool)
            .await?;
        Ok(photos)
    }

    /// Delete a photo record.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Photo", id));
        }
        Ok(())
    }
}
