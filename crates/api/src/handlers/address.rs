//! Handlers for the `/addresses` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::address::{Address, CreateAddress, UpdateAddress};
use procura_db::repositories::AddressRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/addresses
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAddress>,
) -> AppResult<(StatusCode, Json<Address>)> {
    let address = AddressRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// GET /api/v1/addresses
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Address>>> {
    let addresses = AddressRepo::list(&state.pool).await?;
    Ok(Json(addresses))
}

/// GET /api/v1/addresses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Address>> {
    let address = AddressRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Address", id))?;
    Ok(Json(address))
}

/// PUT /api/v1/addresses/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAddress>,
) -> AppResult<Json<Address>> {
    let address = AddressRepo::update(&state.pool, id, &input).await?;
    Ok(Json(address))
}

/// DELETE /api/v1/addresses/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    AddressRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
