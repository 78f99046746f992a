//! Repository for the `payment_conditions` table.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck};
use crate::models::payment_condition::{
    CreatePaymentCondition, PaymentCondition, UpdatePaymentCondition,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, text, active, created_at, updated_at";

/// Entities holding a foreign key to a payment condition.
const DEPENDENTS: &[DependentCheck] = &[
    DependentCheck::new("Supplier", "suppliers", "payment_condition_id"),
    DependentCheck::new("Order", "orders", "payment_condition_id"),
];

/// Provides CRUD operations for payment conditions.
pub struct PaymentConditionRepo;

impl PaymentConditionRepo {
    /// Insert a new payment condition, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePaymentCondition,
    ) -> DbResult<PaymentCondition> {
        let mut tx = pool.begin().await?;

        integrity::assert_unique(
            &mut tx,
            "payment_conditions",
            "name",
            input.name.clone(),
            None,
        )
        .await?;

        let query = format!(
            "INSERT INTO payment_conditions (name, description, text, active)
             VALUES ($1, $2, $3, COALESCE($4, TRUE))
             RETURNING {COLUMNS}"
        );
        let condition = sqlx::query_as::<_, PaymentCondition>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.text)
            .bind(input.active)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(condition)
    }

    /// Find a payment condition by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<PaymentCondition>> {
        let query = format!("SELECT {COLUMNS} FROM payment_conditions WHERE id = $1");
        let condition = sqlx::query_as::<_, PaymentCondition>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(condition)
    }

    /// List all payment conditions ordered by name.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<PaymentCondition>> {
        let query = format!("SELECT {COLUMNS} FROM payment_conditions ORDER BY name");
        let conditions = sqlx::query_as::<_, PaymentCondition>(&query)
            .fetch_all(pool)
            .await?;
        Ok(conditions)
    }

    /// Update a payment condition. A changed name re-runs the uniqueness
    /// check; an explicit `null` clears the description.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePaymentCondition,
    ) -> DbResult<PaymentCondition> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM payment_conditions WHERE id = $1");
        let Some(current) = sqlx::query_as::<_, PaymentCondition>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(DbError::not_found("PaymentCondition", id));
        };

        if let Some(name) = &input.name {
            if *name != current.name {
                integrity::assert_unique(
                    &mut tx,
                    "payment_conditions",
                    "name",
                    name.clone(),
                    Some(id),
                )
                .await?;
            }
        }

        let description_provided = input.description.is_some();
        let description_value = input.description.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE payment_conditions SET
                name        = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                text        = COALESCE($5, text),
                active      = COALESCE($6, active),
                updated_at  = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let condition = sqlx::query_as::<_, PaymentCondition>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(description_provided)
            .bind(description_value)
            .bind(&input.text)
            .bind(input.active)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(condition)
    }

    /// Delete a payment condition unless a supplier or order still
    /// references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "PaymentCondition", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM payment_conditions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("PaymentCondition", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
