//! Generic repository for the five state/status lookup tables.
//!
//! The tables share one shape, so one repository serves them all; a
//! [`StateKind`] marker supplies the table name, the entity name used in
//! errors, and the entities whose rows block deletion.

use std::marker::PhantomData;

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck};
use crate::models::state::{CreateState, State, UpdateState};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, sort_order, active, created_at, updated_at";

/// Compile-time descriptor for one lookup table.
///
/// Implementors are unit marker types; the supertraits let the markers
/// flow through generic async handlers.
pub trait StateKind: Send + Sync + 'static {
    /// Entity name used in error messages.
    const ENTITY: &'static str;
    const TABLE: &'static str;
    /// Entities holding a foreign key to states of this kind.
    const DEPENDENTS: &'static [DependentCheck];
}

pub struct ProjectStates;

impl StateKind for ProjectStates {
    const ENTITY: &'static str = "ProjectState";
    const TABLE: &'static str = "project_states";
    const DEPENDENTS: &'static [DependentCheck] =
        &[DependentCheck::new("Project", "projects", "state_id")];
}

pub struct RequirementStates;

impl StateKind for RequirementStates {
    const ENTITY: &'static str = "RequirementState";
    const TABLE: &'static str = "requirement_states";
    const DEPENDENTS: &'static [DependentCheck] =
        &[DependentCheck::new("Requirement", "requirements", "state_id")];
}

pub struct ArticleStates;

impl StateKind for ArticleStates {
    const ENTITY: &'static str = "ArticleState";
    const TABLE: &'static str = "article_states";
    const DEPENDENTS: &'static [DependentCheck] =
        &[DependentCheck::new("Article", "articles", "state_id")];
}

pub struct OrderStatuses;

impl StateKind for OrderStatuses {
    const ENTITY: &'static str = "OrderStatus";
    const TABLE: &'static str = "order_statuses";
    const DEPENDENTS: &'static [DependentCheck] =
        &[DependentCheck::new("Order", "orders", "status_id")];
}

pub struct ArticleOrderStatuses;

impl StateKind for ArticleOrderStatuses {
    const ENTITY: &'static str = "ArticleOrderStatus";
    const TABLE: &'static str = "article_order_statuses";
    const DEPENDENTS: &'static [DependentCheck] =
        &[DependentCheck::new("ArticleOrder", "article_orders", "status_id")];
}

/// Provides CRUD operations for one lookup table.
pub struct StateRepo<K: StateKind>(PhantomData<K>);

pub type ProjectStateRepo = StateRepo<ProjectStates>;
pub type RequirementStateRepo = StateRepo<RequirementStates>;
pub type ArticleStateRepo = StateRepo<ArticleStates>;
pub type OrderStatusRepo = StateRepo<OrderStatuses>;
pub type ArticleOrderStatusRepo = StateRepo<ArticleOrderStatuses>;

impl<K: StateKind> StateRepo<K> {
    /// Insert a new state, returning the created row.
    ///
    /// `sort_order` defaults to 0 and `active` to true if omitted.
    pub async fn create(pool: &PgPool, input: &CreateState) -> DbResult<State> {
        let mut tx = pool.begin().await?;

        integrity::assert_unique(&mut tx, K::TABLE, "name", input.name.clone(), None).await?;

        let query = format!(
            "INSERT INTO {} (name, description, sort_order, active)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, TRUE))
             RETURNING {COLUMNS}",
            K::TABLE
        );
        let state = sqlx::query_as::<_, State>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sort_order)
            .bind(input.active)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(state)
    }

    /// Find a state by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<State>> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", K::TABLE);
        let state = sqlx::query_as::<_, State>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(state)
    }

    /// List all states ordered by `sort_order`, then name.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<State>> {
        let query = format!("SELECT {COLUMNS} FROM {} ORDER BY sort_order, name", K::TABLE);
        let states = sqlx::query_as::<_, State>(&query).fetch_all(pool).await?;
        Ok(states)
    }

    /// Update a state. Only provided fields are applied; a renamed state
    /// re-runs the uniqueness check against other rows.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateState) -> DbResult<State> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", K::TABLE);
        let Some(current) = sqlx::query_as::<_, State>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(DbError::not_found(K::ENTITY, id));
        };

        if let Some(name) = &input.name {
            if *name != current.name {
                integrity::assert_unique(&mut tx, K::TABLE, "name", name.clone(), Some(id))
                    .await?;
            }
        }

        let description_provided = input.description.is_some();
        let description_value = input.description.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE {} SET
                name        = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                sort_order  = COALESCE($5, sort_order),
                active      = COALESCE($6, active),
                updated_at  = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}",
            K::TABLE
        );
        let state = sqlx::query_as::<_, State>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(description_provided)
            .bind(description_value)
            .bind(input.sort_order)
            .bind(input.active)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(state)
    }

    /// Delete a state unless any row still references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, K::ENTITY, id, K::DEPENDENTS).await?;

        let query = format!("DELETE FROM {} WHERE id = $1", K::TABLE);
        let result = sqlx::query(&query).bind(id).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found(K::ENTITY, id));
        }

        tx.commit().await?;
        Ok(())
    }
}
