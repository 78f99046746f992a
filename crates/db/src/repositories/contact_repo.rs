//! Repository for the `contacts` table.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck, ReferenceCheck};
use crate::models::contact::{Contact, CreateContact, UpdateContact};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, position, client_id, created_at, updated_at";

/// Entities holding a foreign key to a contact.
const DEPENDENTS: &[DependentCheck] =
    &[DependentCheck::new("Budget", "budgets", "contact_id")];

/// Provides CRUD operations for contacts.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateContact) -> DbResult<Contact> {
        let mut tx = pool.begin().await?;

        integrity::assert_references(
            &mut tx,
            &[ReferenceCheck::required("client_id", "clients", input.client_id)],
        )
        .await?;

        let query = format!(
            "INSERT INTO contacts (name, email, phone, position, client_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let contact = sqlx::query_as::<_, Contact>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.position)
            .bind(input.client_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(contact)
    }

    /// Find a contact by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Contact>> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        let contact = sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(contact)
    }

    /// List all contacts ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Contact>> {
        let query = format!("SELECT {COLUMNS} FROM contacts ORDER BY created_at DESC");
        let contacts = sqlx::query_as::<_, Contact>(&query).fetch_all(pool).await?;
        Ok(contacts)
    }

    /// Update a contact. Only provided fields are applied; an explicit
    /// `null` clears email/phone/position.
    ///
    /// Repointing `client_id` is refused while any budget references this
    /// contact: budgets pin the contact to its client, and moving the
    /// contact would orphan that pairing.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateContact) -> DbResult<Contact> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        let Some(current) = sqlx::query_as::<_, Contact>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(DbError::not_found("Contact", id));
        };

        if let Some(client_id) = input.client_id {
            if client_id != current.client_id {
                integrity::assert_references(
                    &mut tx,
                    &[ReferenceCheck::required("client_id", "clients", client_id)],
                )
                .await?;
                integrity::assert_not_referenced(&mut tx, "Contact", id, DEPENDENTS).await?;
            }
        }

        let email_provided = input.email.is_some();
        let email_value = input.email.as_ref().and_then(|v| v.as_deref());
        let phone_provided = input.phone.is_some();
        let phone_value = input.phone.as_ref().and_then(|v| v.as_deref());
        let position_provided = input.position.is_some();
        let position_value = input.position.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE contacts SET
                name       = COALESCE($2, name),
                email      = CASE WHEN $3 THEN $4 ELSE email END,
                phone      = CASE WHEN $5 THEN $6 ELSE phone END,
                position   = CASE WHEN $7 THEN $8 ELSE position END,
                client_id  = COALESCE($9, client_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let contact = sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(email_provided)
            .bind(email_value)
            .bind(phone_provided)
            .bind(phone_value)
            .bind(position_provided)
            .bind(position_value)
            .bind(input.client_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(contact)
    }

    /// Delete a contact unless any budget still references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "Contact", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Contact", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
