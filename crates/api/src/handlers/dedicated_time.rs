//! Handlers for the `/dedicated-times` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::dedicated_time::{
    CreateDedicatedTime, DedicatedTime, UpdateDedicatedTime,
};
use procura_db::repositories::DedicatedTimeRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/dedicated-times
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDedicatedTime>,
) -> AppResult<(StatusCode, Json<DedicatedTime>)> {
    let entry = DedicatedTimeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/dedicated-times
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<DedicatedTime>>> {
    let entries = DedicatedTimeRepo::list(&state.pool).await?;
    Ok(Json(entries))
}

/// GET /api/v1/dedicated-times/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DedicatedTime>> {
    let entry = DedicatedTimeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("DedicatedTime", id))?;
    Ok(Json(entry))
}

/// PUT /api/v1/dedicated-times/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDedicatedTime>,
) -> AppResult<Json<DedicatedTime>> {
    let entry = DedicatedTimeRepo::update(&state.pool, id, &input).await?;
    Ok(Json(entry))
}

/// DELETE /api/v1/dedicated-times/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    DedicatedTimeRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
