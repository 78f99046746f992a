//! Repository for the `budgets` table.
//!
//! Budgets pair a client with one of that client's contacts; the pairing
//! is validated on every write, whichever side of it changes.

use procura_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck, ReferenceCheck};
use crate::models::budget::{Budget, CreateBudget, UpdateBudget};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, number, name, client_id, contact_id, delivery_date, \
    created_at, updated_at";

/// Entities holding a foreign key to a budget.
const DEPENDENTS: &[DependentCheck] = &[DependentCheck::new("Project", "projects", "budget_id")];

/// Provides CRUD operations for budgets.
pub struct BudgetRepo;

impl BudgetRepo {
    /// Insert a new budget, returning the created row.
    ///
    /// The contact must belong to the given client.
    pub async fn create(pool: &PgPool, input: &CreateBudget) -> DbResult<Budget> {
        let mut tx = pool.begin().await?;

        integrity::assert_unique(&mut tx, "budgets", "number", input.number, None).await?;
        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::required("client_id", "clients", input.client_id),
                ReferenceCheck::required("contact_id", "contacts", input.contact_id),
            ],
        )
        .await?;
        Self::assert_contact_belongs(&mut tx, input.contact_id, input.client_id).await?;

        let query = format!(
            "INSERT INTO budgets (number, name, client_id, contact_id, delivery_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let budget = sqlx::query_as::<_, Budget>(&query)
            .bind(input.number)
            .bind(&input.name)
            .bind(input.client_id)
            .bind(input.contact_id)
            .bind(input.delivery_date)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(budget)
    }

    /// Find a budget by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Budget>> {
        let query = format!("SELECT {COLUMNS} FROM budgets WHERE id = $1");
        let budget = sqlx::query_as::<_, Budget>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(budget)
    }

    /// List all budgets ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Budget>> {
        let query = format!("SELECT {COLUMNS} FROM budgets ORDER BY created_at DESC");
        let budgets = sqlx::query_as::<_, Budget>(&query).fetch_all(pool).await?;
        Ok(budgets)
    }

    /// Update a budget. A changed number re-runs the uniqueness check,
    /// and the client/contact pairing is re-validated with whichever of
    /// the two the caller provided merged over the stored values.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateBudget) -> DbResult<Budget> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM budgets WHERE id = $1");
        let Some(current) = sqlx::query_as::<_, Budget>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(DbError::not_found("Budget", id));
        };

        if let Some(number) = input.number {
            if number != current.number {
                integrity::assert_unique(&mut tx, "budgets", "number", number, Some(id)).await?;
            }
        }

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::optional("client_id", "clients", input.client_id),
                ReferenceCheck::optional("contact_id", "contacts", input.contact_id),
            ],
        )
        .await?;

        // The pairing invariant holds over the merged row, so a repointed
        // client without a new contact (and vice versa) is checked too.
        let effective_client = input.client_id.unwrap_or(current.client_id);
        let effective_contact = input.contact_id.unwrap_or(current.contact_id);
        if input.client_id.is_some() || input.contact_id.is_some() {
            Self::assert_contact_belongs(&mut tx, effective_contact, effective_client).await?;
        }

        let query = format!(
            "UPDATE budgets SET
                number        = COALESCE($2, number),
                name          = COALESCE($3, name),
                client_id     = COALESCE($4, client_id),
                contact_id    = COALESCE($5, contact_id),
                delivery_date = COALESCE($6, delivery_date),
                updated_at    = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let budget = sqlx::query_as::<_, Budget>(&query)
            .bind(id)
            .bind(input.number)
            .bind(&input.name)
            .bind(input.client_id)
            .bind(input.contact_id)
            .bind(input.delivery_date)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(budget)
    }

    /// Delete a budget unless a project still references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "Budget", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM budgets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Budget", id));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Fail with `InvalidReference` on `contact_id` when the contact does
    /// not belong to the client.
    async fn assert_contact_belongs(
        conn: &mut PgConnection,
        contact_id: DbId,
        client_id: DbId,
    ) -> DbResult<()> {
        let owner: Option<DbId> =
            sqlx::query_scalar("SELECT client_id FROM contacts WHERE id = $1")
                .bind(contact_id)
                .fetch_optional(&mut *conn)
                .await?;
        match owner {
            Some(owner) if owner == client_id => Ok(()),
            _ => Err(DbError::invalid_reference("contact_id", contact_id)),
        }
    }
}
