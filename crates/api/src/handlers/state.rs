//! Handlers for the state/status lookup resources.
//!
//! One generic set of functions serves all five lookup tables; the
//! routes instantiate them per [`StateKind`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::state::{CreateState, State as StateRow, UpdateState};
use procura_db::repositories::{StateKind, StateRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/<states>
pub async fn create<K: StateKind>(
    State(state): State<AppState>,
    Json(input): Json<CreateState>,
) -> AppResult<(StatusCode, Json<StateRow>)> {
    let row = StateRepo::<K>::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/<states>
pub async fn list<K: StateKind>(State(state): State<AppState>) -> AppResult<Json<Vec<StateRow>>> {
    let rows = StateRepo::<K>::list(&state.pool).await?;
    Ok(Json(rows))
}

/// GET /api/v1/<states>/{id}
pub async fn get_by_id<K: StateKind>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StateRow>> {
    let row = StateRepo::<K>::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(K::ENTITY, id))?;
    Ok(Json(row))
}

/// PUT /api/v1/<states>/{id}
pub async fn update<K: StateKind>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateState>,
) -> AppResult<Json<StateRow>> {
    let row = StateRepo::<K>::update(&state.pool, id, &input).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/<states>/{id}
pub async fn delete<K: StateKind>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    StateRepo::<K>::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
