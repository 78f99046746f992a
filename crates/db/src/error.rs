//! Error type shared by all repositories.

use procura_core::error::CoreError;
use procura_core::types::DbId;

/// A repository failure: a domain-rule violation or a store error.
///
/// Domain variants are produced by the integrity components before any
/// row is written; `Store` covers everything the database itself rejects,
/// including constraint violations that only surface at commit time.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error("store failure: {0}")]
    Store(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }.into()
    }

    pub fn invalid_reference(field: &'static str, id: DbId) -> Self {
        CoreError::InvalidReference { field, id }.into()
    }

    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        CoreError::DuplicateValue {
            field,
            value: value.into(),
        }
        .into()
    }

    pub fn in_use(entity: &'static str, id: DbId, dependent: &'static str) -> Self {
        CoreError::EntityInUse {
            entity,
            id,
            dependent,
        }
        .into()
    }
}
