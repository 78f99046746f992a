//! Repository for the `reports` table.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck, ReferenceCheck};
use crate::models::report::{CreateReport, Report, UpdateReport};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, duration_secs, dead_time_secs, \
    dead_time_cause, project_id, responsible_id, created_at, updated_at";

/// Entities holding a foreign key to a report.
const DEPENDENTS: &[DependentCheck] = &[
    DependentCheck::new("DedicatedTime", "dedicated_times", "report_id"),
    DependentCheck::new("Photo", "photos", "report_id"),
];

/// Provides CRUD operations for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a new report, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReport) -> DbResult<Report> {
        let mut tx = pool.begin().await?;

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::optional("project_id", "projects", input.project_id),
                ReferenceCheck::optional("responsible_id", "users", input.responsible_id),
            ],
        )
        .await?;

        let query = format!(
            "INSERT INTO reports
                (title, description, duration_secs, dead_time_secs, dead_time_cause,
                 project_id, responsible_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let report = sqlx::query_as::<_, Report>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration_secs)
            .bind(input.dead_time_secs)
            .bind(&input.dead_time_cause)
            .bind(input.project_id)
            .bind(input.responsible_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(report)
    }

    /// Find a report by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Report>> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        let report = sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(report)
    }

    /// List all reports ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Report>> {
        let query = format!("SELECT {COLUMNS} FROM reports ORDER BY created_at DESC");
        let reports = sqlx::query_as::<_, Report>(&query).fetch_all(pool).await?;
        Ok(reports)
    }

    /// Update a report. Provided references are re-validated; an explicit
    /// `null` detaches project/responsible or clears the dead-time cause.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateReport) -> DbResult<Report> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        let exists = sqlx::query_as::<_, Report>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DbError::not_found("Report", id));
        }

        let project = input.project_id.flatten();
        let responsible = input.responsible_id.flatten();

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::optional("project_id", "projects", project),
                ReferenceCheck::optional("responsible_id", "users", responsible),
            ],
        )
        .await?;

        let cause_provided = input.dead_time_cause.is_some();
        let cause_value = input.dead_time_cause.as_ref().and_then(|v| v.as_deref());
        let project_provided = input.project_id.is_some();
        let responsible_provided = input.responsible_id.is_some();

        let query = format!(
            "UPDATE reports SET
                title           = COALESCE($2, title),
                description     = COALESCE($3, description),
                duration_secs   = COALESCE($4, duration_secs),
                dead_time_secs  = COALESCE($5, dead_time_secs),
                dead_time_cause = CASE WHEN $6 THEN $7 ELSE dead_time_cause END,
                project_id      = CASE WHEN $8 THEN $9 ELSE project_id END,
                responsible_id  = CASE WHEN $10 THEN $11 ELSE responsible_id END,
                updated_at      = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let report = sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.duration_secs)
            .bind(input.dead_time_secs)
            .bind(cause_provided)
            .bind(cause_value)
            .bind(project_provided)
            .bind(project)
            .bind(responsible_provided)
            .bind(responsible)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(report)
    }

    /// Delete a report unless a dedicated-time entry or photo still
    /// references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "Report", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Report", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
