//! Repository for the `projects` table.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck, ReferenceCheck};
use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, number, name, description, date, state_id, responsible_id, \
    client_id, budget_id, created_at, updated_at";

/// Entities holding a foreign key to a project.
const DEPENDENTS: &[DependentCheck] = &[
    DependentCheck::new("Requirement", "requirements", "project_id"),
    DependentCheck::new("Report", "reports", "project_id"),
];

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `date` defaults to the current time if omitted. A linked budget is
    /// exclusive: attaching a budget already held by another project
    /// fails as a duplicate.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> DbResult<Project> {
        let mut tx = pool.begin().await?;

        integrity::assert_unique(&mut tx, "projects", "number", input.number.clone(), None)
            .await?;
        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::required("state_id", "project_states", input.state_id),
                ReferenceCheck::optional("responsible_id", "users", input.responsible_id),
                ReferenceCheck::optional("client_id", "clients", input.client_id),
                ReferenceCheck::optional("budget_id", "budgets", input.budget_id),
            ],
        )
        .await?;
        if let Some(budget_id) = input.budget_id {
            integrity::assert_unique(&mut tx, "projects", "budget_id", budget_id, None).await?;
        }

        let query = format!(
            "INSERT INTO projects
                (number, name, description, date, state_id, responsible_id, client_id, budget_id)
             VALUES ($1, $2, $3, COALESCE($4, NOW()), $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.number)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.date)
            .bind(input.state_id)
            .bind(input.responsible_id)
            .bind(input.client_id)
            .bind(input.budget_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Project>> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(project)
    }

    /// List all projects ordered by most recent date first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Project>> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY date DESC, id DESC");
        let projects = sqlx::query_as::<_, Project>(&query).fetch_all(pool).await?;
        Ok(projects)
    }

    /// Update a project. A changed number re-runs the uniqueness check;
    /// provided references are re-validated; explicit `null` detaches
    /// responsible/client/budget.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateProject) -> DbResult<Project> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let Some(current) = sqlx::query_as::<_, Project>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(DbError::not_found("Project", id));
        };

        if let Some(number) = &input.number {
            if *number != current.number {
                integrity::assert_unique(&mut tx, "projects", "number", number.clone(), Some(id))
                    .await?;
            }
        }

        let responsible = input.responsible_id.flatten();
        let client = input.client_id.flatten();
        let budget = input.budget_id.flatten();

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::optional("state_id", "project_states", input.state_id),
                ReferenceCheck::optional("responsible_id", "users", responsible),
                ReferenceCheck::optional("client_id", "clients", client),
                ReferenceCheck::optional("budget_id", "budgets", budget),
            ],
        )
        .await?;
        if let Some(budget_id) = budget {
            if current.budget_id != Some(budget_id) {
                integrity::assert_unique(&mut tx, "projects", "budget_id", budget_id, Some(id))
                    .await?;
            }
        }

        let description_provided = input.description.is_some();
        let description_value = input.description.as_ref().and_then(|v| v.as_deref());
        let responsible_provided = input.responsible_id.is_some();
        let client_provided = input.client_id.is_some();
        let budget_provided = input.budget_id.is_some();

        let query = format!(
            "UPDATE projects SET
                number         = COALESCE($2, number),
                name           = COALESCE($3, name),
                description    = CASE WHEN $4 THEN $5 ELSE description END,
                date           = COALESCE($6, date),
                state_id       = COALESCE($7, state_id),
                responsible_id = CASE WHEN $8 THEN $9 ELSE responsible_id END,
                client_id      = CASE WHEN $10 THEN $11 ELSE client_id END,
                budget_id      = CASE WHEN $12 THEN $13 ELSE budget_id END,
                updated_at     = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.number)
            .bind(&input.name)
            .bind(description_provided)
            .bind(description_value)
            .bind(input.date)
            .bind(input.state_id)
            .bind(responsible_provided)
            .bind(responsible)
            .bind(client_provided)
            .bind(client)
            .bind(budget_provided)
            .bind(budget)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Delete a project unless a requirement or report still references
    /// it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "Project", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Project", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
