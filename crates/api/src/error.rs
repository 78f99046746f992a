use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use procura_core::error::CoreError;
use procura_core::types::DbId;
use procura_db::DbError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`DbError`] and implements [`IntoResponse`] to produce
/// consistent JSON error responses of the form
/// `{ "error": <message>, "code": <machine code> }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A repository error from `procura_db`.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Shorthand for a 404 on a missing entity.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        AppError::Db(DbError::not_found(entity, id))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Db(DbError::Domain(domain)) => match domain {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", domain.to_string())
                }
                CoreError::InvalidReference { .. } => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_REFERENCE",
                    domain.to_string(),
                ),
                CoreError::DuplicateValue { .. } => {
                    (StatusCode::CONFLICT, "DUPLICATE_VALUE", domain.to_string())
                }
                CoreError::EntityInUse { .. } => {
                    (StatusCode::CONFLICT, "ENTITY_IN_USE", domain.to_string())
                }
            },
            AppError::Db(DbError::Store(err)) => classify_sqlx_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`)
///   map to 409: a race the pre-write uniqueness check could not see is
///   still surfaced as a duplicate, not a server fault.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "DUPLICATE_VALUE",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
