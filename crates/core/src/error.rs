use crate::types::DbId;

/// Domain failures shared by every write path.
///
/// Each variant names the entity or attribute involved so the HTTP layer
/// can surface an actionable message without re-querying anything.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A foreign-key attribute in the payload points at a row that does
    /// not exist (or exists under the wrong parent).
    #[error("invalid reference: {field} = {id}")]
    InvalidReference { field: &'static str, id: DbId },

    /// A unique-constrained attribute collides with another row.
    #[error("duplicate value for {field}: {value}")]
    DuplicateValue { field: &'static str, value: String },

    /// Deletion blocked because another entity still references the target.
    #[error("{entity} {id} is still referenced by {dependent}")]
    EntityInUse {
        entity: &'static str,
        id: DbId,
        dependent: &'static str,
    },
}
