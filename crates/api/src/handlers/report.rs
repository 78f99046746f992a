//! Handlers for the `/reports` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::report::{CreateReport, Report, UpdateReport};
use procura_db::repositories::ReportRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/reports
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateReport>,
) -> AppResult<(StatusCode, Json<Report>)> {
    let report = ReportRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/v1/reports
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Report>>> {
    let reports = ReportRepo::list(&state.pool).await?;
    Ok(Json(reports))
}

/// GET /api/v1/reports/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Report>> {
    let report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Report", id))?;
    Ok(Json(report))
}

/// PUT /api/v1/reports/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReport>,
) -> AppResult<Json<Report>> {
    let report = ReportRepo::update(&state.pool, id, &input).await?;
    Ok(Json(report))
}

/// DELETE /api/v1/reports/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    ReportRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
