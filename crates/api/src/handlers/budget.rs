//! Handlers for the `/budgets` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::budget::{Budget, CreateBudget, UpdateBudget};
use procura_db::repositories::BudgetRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/budgets
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBudget>,
) -> AppResult<(StatusCode, Json<Budget>)> {
    let budget = BudgetRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

/// GET /api/v1/budgets
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Budget>>> {
    let budgets = BudgetRepo::list(&state.pool).await?;
    Ok(Json(budgets))
}

/// GET /api/v1/budgets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Budget>> {
    let budget = BudgetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Budget", id))?;
    Ok(Json(budget))
}

/// PUT /api/v1/budgets/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBudget>,
) -> AppResult<Json<Budget>> {
    let budget = BudgetRepo::update(&state.pool, id, &input).await?;
    Ok(Json(budget))
}

/// DELETE /api/v1/budgets/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    BudgetRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
