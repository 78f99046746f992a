//! Handlers for the `/photos` resource.
//!
//! Photo rows are immutable: create, read and delete only. File upload
//! and thumbnailing live outside this service.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::photo::{CreatePhoto, Photo};
use procura_db::repositories::PhotoRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/photos
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePhoto>,
) -> AppResult<(StatusCode, Json<Photo>)> {
    let photo = PhotoRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// GET /api/v1/photos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Photo>>> {
    let photos = PhotoRepo::list(&state.pool).await?;
    Ok(Json(photos))
}

/// GET /api/v1/photos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Photo>> {
    let photo = PhotoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Photo", id))?;
    Ok(Json(photo))
}

/// DELETE /api/v1/photos/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    PhotoRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
