//! Referential-integrity components shared by every write path.
//!
//! All three checks take `&mut PgConnection` so repositories can evaluate
//! them inside the same transaction as the write they protect
//! (`&mut *tx`). None of them mutates anything.

use procura_core::types::DbId;
use sqlx::PgConnection;

use crate::error::{DbError, DbResult};

/// One foreign-key attribute to verify before a write.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCheck {
    /// Payload attribute name reported on failure.
    pub field: &'static str,
    /// Table the reference must resolve in.
    pub table: &'static str,
    /// Referenced id. `None` (an absent optional reference) always passes.
    pub id: Option<DbId>,
}

impl ReferenceCheck {
    pub fn required(field: &'static str, table: &'static str, id: DbId) -> Self {
        Self {
            field,
            table,
            id: Some(id),
        }
    }

    pub fn optional(field: &'static str, table: &'static str, id: Option<DbId>) -> Self {
        Self { field, table, id }
    }
}

/// Verify that every present id in `checks` resolves to an existing row.
///
/// Fails with `InvalidReference` naming the first offending attribute.
pub async fn assert_references(
    conn: &mut PgConnection,
    checks: &[ReferenceCheck],
) -> DbResult<()> {
    for check in checks {
        let Some(id) = check.id else { continue };
        let query = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", check.table);
        let exists: bool = sqlx::query_scalar(&query)
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        if !exists {
            return Err(DbError::invalid_reference(check.field, id));
        }
    }
    Ok(())
}

/// Verify that `value` is not already taken for `column` on another row.
///
/// `exclude_id` skips the row being updated so self-matches pass; pass
/// `None` on create. This runs strictly before the write -- the table's
/// own `uq_*` index resolves the race two concurrent checks can miss.
pub async fn assert_unique<V>(
    conn: &mut PgConnection,
    table: &'static str,
    column: &'static str,
    value: V,
    exclude_id: Option<DbId>,
) -> DbResult<()>
where
    V: for<'q> sqlx::Encode<'q, sqlx::Postgres>
        + sqlx::Type<sqlx::Postgres>
        + std::fmt::Display
        + Send,
{
    let shown = value.to_string();
    let query = format!(
        "SELECT EXISTS (SELECT 1 FROM {table} \
         WHERE {column} = $1 AND ($2::BIGINT IS NULL OR id <> $2))"
    );
    let taken: bool = sqlx::query_scalar(&query)
        .bind(value)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await?;
    if taken {
        return Err(DbError::duplicate(column, shown));
    }
    Ok(())
}

/// One entity type that may hold a foreign key to a delete target.
#[derive(Debug, Clone, Copy)]
pub struct DependentCheck {
    /// Dependent entity name reported on failure.
    pub entity: &'static str,
    pub table: &'static str,
    /// Foreign-key column pointing at the delete target.
    pub column: &'static str,
}

impl DependentCheck {
    pub const fn new(entity: &'static str, table: &'static str, column: &'static str) -> Self {
        Self {
            entity,
            table,
            column,
        }
    }
}

/// Block deletion of `entity`/`id` while any dependent row references it.
///
/// Must run in the same transaction as the delete so a dependent inserted
/// concurrently either serializes before the check or after the delete.
pub async fn assert_not_referenced(
    conn: &mut PgConnection,
    entity: &'static str,
    id: DbId,
    dependents: &[DependentCheck],
) -> DbResult<()> {
    for dep in dependents {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {} = $1)",
            dep.table, dep.column
        );
        let referenced: bool = sqlx::query_scalar(&query)
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        if referenced {
            return Err(DbError::in_use(entity, id, dep.entity));
        }
    }
    Ok(())
}
