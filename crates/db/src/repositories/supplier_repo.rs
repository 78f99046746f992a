//! Repository for the `suppliers` table.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck, ReferenceCheck};
use crate::models::supplier::{CreateSupplier, Supplier, UpdateSupplier};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, tax_id, address_id, bank_details, delivery_time, \
    payment_condition_id, currency, notes, created_at, updated_at";

/// Entities holding a foreign key to a supplier.
const DEPENDENTS: &[DependentCheck] = &[DependentCheck::new("Order", "orders", "supplier_id")];

/// Provides CRUD operations for suppliers.
pub struct SupplierRepo;

impl SupplierRepo {
    /// Insert a new supplier, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSupplier) -> DbResult<Supplier> {
        let mut tx = pool.begin().await?;

        integrity::assert_unique(&mut tx, "suppliers", "tax_id", input.tax_id.clone(), None)
            .await?;
        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::required("address_id", "addresses", input.address_id),
                ReferenceCheck::required(
                    "payment_condition_id",
                    "payment_conditions",
                    input.payment_condition_id,
                ),
            ],
        )
        .await?;

        let query = format!(
            "INSERT INTO suppliers
                (name, tax_id, address_id, bank_details, delivery_time,
                 payment_condition_id, currency, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let supplier = sqlx::query_as::<_, Supplier>(&query)
            .bind(&input.name)
            .bind(&input.tax_id)
            .bind(input.address_id)
            .bind(&input.bank_details)
            .bind(&input.delivery_time)
            .bind(input.payment_condition_id)
            .bind(&input.currency)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(supplier)
    }

    /// Find a supplier by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Supplier>> {
        let query = format!("SELECT {COLUMNS} FROM suppliers WHERE id = $1");
        let supplier = sqlx::query_as::<_, Supplier>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(supplier)
    }

    /// List all suppliers ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Supplier>> {
        let query = format!("SELECT {COLUMNS} FROM suppliers ORDER BY created_at DESC");
        let suppliers = sqlx::query_as::<_, Supplier>(&query).fetch_all(pool).await?;
        Ok(suppliers)
    }

    /// Update a supplier. A changed tax id re-runs the uniqueness check;
    /// repointed references are re-validated.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateSupplier) -> DbResult<Supplier> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM suppliers WHERE id = $1");
        let Some(current) = sqlx::query_as::<_, Supplier>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(DbError::not_found("Supplier", id));
        };

        if let Some(tax_id) = &input.tax_id {
            if *tax_id != current.tax_id {
                integrity::assert_unique(&mut tx, "suppliers", "tax_id", tax_id.clone(), Some(id))
                    .await?;
            }
        }

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::optional("address_id", "addresses", input.address_id),
                ReferenceCheck::optional(
                    "payment_condition_id",
                    "payment_conditions",
                    input.payment_condition_id,
                ),
            ],
        )
        .await?;

        let notes_provided = input.notes.is_some();
        let notes_value = input.notes.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE suppliers SET
                name                 = COALESCE($2, name),
                tax_id               = COALESCE($3, tax_id),
                address_id           = COALESCE($4, address_id),
                bank_details         = COALESCE($5, bank_details),
                delivery_time        = COALESCE($6, delivery_time),
                payment_condition_id = COALESCE($7, payment_condition_id),
                currency             = COALESCE($8, currency),
                notes                = CASE WHEN $9 THEN $10 ELSE notes END,
                updated_at           = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let supplier = sqlx::query_as::<_, Supplier>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.tax_id)
            .bind(input.address_id)
            .bind(&input.bank_details)
            .bind(&input.delivery_time)
            .bind(input.payment_condition_id)
            .bind(&input.currency)
            .bind(notes_provided)
            .bind(notes_value)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(supplier)
    }

    /// Delete a supplier unless an order still references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "Supplier", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
