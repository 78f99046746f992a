//! Handlers for the `/requirements` resource, including the composite
//! requirement-with-articles create.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::requirement::{
    CreateRequirement, CreateRequirementWithArticles, Requirement, RequirementWithArticles,
    UpdateRequirement,
};
use procura_db::repositories::RequirementRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/requirements
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRequirement>,
) -> AppResult<(StatusCode, Json<Requirement>)> {
    let requirement = RequirementRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(requirement)))
}

/// POST /api/v1/requirements/with-articles
///
/// Creates the requirement and all articles atomically; a validation
/// failure anywhere leaves nothing behind.
pub async fn create_with_articles(
    State(state): State<AppState>,
    Json(input): Json<CreateRequirementWithArticles>,
) -> AppResult<(StatusCode, Json<RequirementWithArticles>)> {
    let created = RequirementRepo::create_with_articles(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/requirements
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Requirement>>> {
    let requirements = RequirementRepo::list(&state.pool).await?;
    Ok(Json(requirements))
}

/// GET /api/v1/requirements/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Requirement>> {
    let requirement = RequirementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Requirement", id))?;
    Ok(Json(requirement))
}

/// PUT /api/v1/requirements/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRequirement>,
) -> AppResult<Json<Requirement>> {
    let requirement = RequirementRepo::update(&state.pool, id, &input).await?;
    Ok(Json(requirement))
}

/// DELETE /api/v1/requirements/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    RequirementRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
