//! Handlers for the `/articles` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::article::{Article, CreateArticle, UpdateArticle};
use procura_db::repositories::ArticleRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/articles
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateArticle>,
) -> AppResult<(StatusCode, Json<Article>)> {
    let article = ArticleRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

/// GET /api/v1/articles
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Article>>> {
    let articles = ArticleRepo::list(&state.pool).await?;
    Ok(Json(articles))
}

/// GET /api/v1/articles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Article>> {
    let article = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Article", id))?;
    Ok(Json(article))
}

/// PUT /api/v1/articles/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArticle>,
) -> AppResult<Json<Article>> {
    let article = ArticleRepo::update(&state.pool, id, &input).await?;
    Ok(Json(article))
}

/// DELETE /api/v1/articles/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    ArticleRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
