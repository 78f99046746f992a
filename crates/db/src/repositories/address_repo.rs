//! Repository for the `addresses` table.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck};
use crate::models::address::{Address, CreateAddress, UpdateAddress};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, street, exterior_number, interior_number, neighborhood, \
    postal_code, city, state, country, notes, created_at, updated_at";

/// Entities holding a foreign key to an address.
const DEPENDENTS: &[DependentCheck] = &[
    DependentCheck::new("Supplier", "suppliers", "address_id"),
    DependentCheck::new("Order", "orders", "shipping_address_id"),
];

/// Provides CRUD operations for addresses.
pub struct AddressRepo;

impl AddressRepo {
    /// Insert a new address, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAddress) -> DbResult<Address> {
        let query = format!(
            "INSERT INTO addresses
                (street, exterior_number, interior_number, neighborhood,
                 postal_code, city, state, country, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let address = sqlx::query_as::<_, Address>(&query)
            .bind(&input.street)
            .bind(&input.exterior_number)
            .bind(&input.interior_number)
            .bind(&input.neighborhood)
            .bind(&input.postal_code)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.country)
            .bind(&input.notes)
            .fetch_one(pool)
            .await?;
        Ok(address)
    }

    /// Find an address by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Address>> {
        let query = format!("SELECT {COLUMNS} FROM addresses WHERE id = $1");
        let address = sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(address)
    }

    /// List all addresses ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Address>> {
        let query = format!("SELECT {COLUMNS} FROM addresses ORDER BY created_at DESC");
        let addresses = sqlx::query_as::<_, Address>(&query).fetch_all(pool).await?;
        Ok(addresses)
    }

    /// Update an address. Only provided fields are applied; an explicit
    /// `null` clears interior_number/notes.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateAddress) -> DbResult<Address> {
        let interior_provided = input.interior_number.is_some();
        let interior_value = input.interior_number.as_ref().and_then(|v| v.as_deref());
        let notes_provided = input.notes.is_some();
        let notes_value = input.notes.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE addresses SET
                street          = COALESCE($2, street),
                exterior_number = COALESCE($3, exterior_number),
                interior_number = CASE WHEN $4 THEN $5 ELSE interior_number END,
                neighborhood    = COALESCE($6, neighborhood),
                postal_code     = COALESCE($7, postal_code),
                city            = COALESCE($8, city),
                state           = COALESCE($9, state),
                country         = COALESCE($10, country),
                notes           = CASE WHEN $11 THEN $12 ELSE notes END,
                updated_at      = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let address = sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .bind(&input.street)
            .bind(&input.exterior_number)
            .bind(interior_provided)
            .bind(interior_value)
            .bind(&input.neighborhood)
            .bind(&input.postal_code)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.country)
            .bind(notes_provided)
            .bind(notes_value)
            .fetch_optional(pool)
            .await?;

        address.ok_or_else(|| DbError::not_found("Address", id))
    }

    /// Delete an address unless a supplier or order still references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "Address", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Address", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
