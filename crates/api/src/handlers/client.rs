//! Handlers for the `/clients` resource, including the aggregate
//! overview endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::client::{Client, ClientOverview, CreateClient, UpdateClient};
use procura_db::repositories::ClientRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = ClientRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/v1/clients
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Client>>> {
    let clients = ClientRepo::list(&state.pool).await?;
    Ok(Json(clients))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Client>> {
    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Client", id))?;
    Ok(Json(client))
}

/// GET /api/v1/clients/{id}/overview
///
/// The client plus the five most recent projects, contacts and budgets.
pub async fn overview(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ClientOverview>> {
    let overview = ClientRepo::overview(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Client", id))?;
    Ok(Json(overview))
}

/// PUT /api/v1/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<Json<Client>> {
    let client = ClientRepo::update(&state.pool, id, &input).await?;
    Ok(Json(client))
}

/// DELETE /api/v1/clients/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    ClientRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
