//! Repository for the `clients` table, including the aggregate overview.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck};
use crate::models::client::{
    BudgetSummary, Client, ClientOverview, ContactSummary, CreateClient, ProjectSummary,
    UpdateClient,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Rows returned per related collection in the overview.
const LATEST_LIMIT: i64 = 5;

/// Entities holding a foreign key to a client.
const DEPENDENTS: &[DependentCheck] = &[
    DependentCheck::new("Contact", "contacts", "client_id"),
    DependentCheck::new("Project", "projects", "client_id"),
    DependentCheck::new("Budget", "budgets", "client_id"),
];

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> DbResult<Client> {
        let mut tx = pool.begin().await?;

        integrity::assert_unique(&mut tx, "clients", "name", input.name.clone(), None).await?;

        let query = format!(
            "INSERT INTO clients (name)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(&input.name)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(client)
    }

    /// Find a client by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Client>> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(client)
    }

    /// List all clients ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Client>> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY created_at DESC");
        let clients = sqlx::query_as::<_, Client>(&query).fetch_all(pool).await?;
        Ok(clients)
    }

    /// Assemble the client plus the newest [`LATEST_LIMIT`] rows of each
    /// related collection, each independently sorted and truncated.
    ///
    /// Ties on the recency field break by `id DESC` so repeated calls
    /// against unchanged data return identical results. Read-only.
    pub async fn overview(pool: &PgPool, id: DbId) -> DbResult<Option<ClientOverview>> {
        let Some(client) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let latest_projects = sqlx::query_as::<_, ProjectSummary>(
            "SELECT id, name, number, date, state_id FROM projects
             WHERE client_id = $1
             ORDER BY date DESC, id DESC
             LIMIT $2",
        )
        .bind(id)
        .bind(LATEST_LIMIT)
        .fetch_all(pool)
        .await?;

        let latest_contacts = sqlx::query_as::<_, ContactSummary>(
            "SELECT id, name, email, phone, position FROM contacts
             WHERE client_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2",
        )
        .bind(id)
        .bind(LATEST_LIMIT)
        .fetch_all(pool)
        .await?;

        let latest_budgets = sqlx::query_as::<_, BudgetSummary>(
            "SELECT id, name, delivery_date, contact_id FROM budgets
             WHERE client_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2",
        )
        .bind(id)
        .bind(LATEST_LIMIT)
        .fetch_all(pool)
        .await?;

        Ok(Some(ClientOverview {
            client,
            latest_projects,
            latest_contacts,
            latest_budgets,
        }))
    }

    /// Update a client. A changed name re-runs the uniqueness check.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateClient) -> DbResult<Client> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        let Some(current) = sqlx::query_as::<_, Client>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(DbError::not_found("Client", id));
        };

        if let Some(name) = &input.name {
            if *name != current.name {
                integrity::assert_unique(&mut tx, "clients", "name", name.clone(), Some(id))
                    .await?;
            }
        }

        let query = format!(
            "UPDATE clients SET
                name       = COALESCE($2, name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(client)
    }

    /// Delete a client unless any row still references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "Client", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
