//! Repository for the `users` table.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, full_name, created_at, updated_at";

/// Entities holding a foreign key to a user.
const DEPENDENTS: &[DependentCheck] = &[
    DependentCheck::new("Project", "projects", "responsible_id"),
    DependentCheck::new("Requirement", "requirements", "requested_by"),
    DependentCheck::new("Order", "orders", "acceptance_id"),
    DependentCheck::new("Order", "orders", "requested_by_id"),
    DependentCheck::new("Order", "orders", "reviewed_by_id"),
    DependentCheck::new("Order", "orders", "approved_by_id"),
    DependentCheck::new("Report", "reports", "responsible_id"),
    DependentCheck::new("DedicatedTime", "dedicated_times", "user_id"),
];

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> DbResult<User> {
        let mut tx = pool.begin().await?;

        integrity::assert_unique(&mut tx, "users", "username", input.username.clone(), None)
            .await?;

        let query = format!(
            "INSERT INTO users (username, full_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.full_name)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<User>> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        let users = sqlx::query_as::<_, User>(&query).fetch_all(pool).await?;
        Ok(users)
    }

    /// Update a user. Only provided fields are applied; a changed
    /// username re-runs the uniqueness check.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateUser) -> DbResult<User> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let Some(current) = sqlx::query_as::<_, User>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(DbError::not_found("User", id));
        };

        if let Some(username) = &input.username {
            if *username != current.username {
                integrity::assert_unique(&mut tx, "users", "username", username.clone(), Some(id))
                    .await?;
            }
        }

        let query = format!(
            "UPDATE users SET
                username   = COALESCE($2, username),
                full_name  = COALESCE($3, full_name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.full_name)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Delete a user unless any row still references them.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "User", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
