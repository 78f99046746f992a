//! Handlers for the `/article-orders` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::article_order::{ArticleOrder, CreateArticleOrder, UpdateArticleOrder};
use procura_db::repositories::ArticleOrderRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/article-orders
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateArticleOrder>,
) -> AppResult<(StatusCode, Json<ArticleOrder>)> {
    let line = ArticleOrderRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// GET /api/v1/article-orders
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ArticleOrder>>> {
    let lines = ArticleOrderRepo::list(&state.pool).await?;
    Ok(Json(lines))
}

/// GET /api/v1/article-orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ArticleOrder>> {
    let line = ArticleOrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("ArticleOrder", id))?;
    Ok(Json(line))
}

/// PUT /api/v1/article-orders/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArticleOrder>,
) -> AppResult<Json<ArticleOrder>> {
    let line = ArticleOrderRepo::update(&state.pool, id, &input).await?;
    Ok(Json(line))
}

/// DELETE /api/v1/article-orders/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    ArticleOrderRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
