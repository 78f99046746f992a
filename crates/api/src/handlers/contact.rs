//! Handlers for the `/contacts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::contact::{Contact, CreateContact, UpdateContact};
use procura_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/contacts
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateContact>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    let contact = ContactRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /api/v1/contacts
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Contact>>> {
    let contacts = ContactRepo::list(&state.pool).await?;
    Ok(Json(contacts))
}

/// GET /api/v1/contacts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Contact>> {
    let contact = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Contact", id))?;
    Ok(Json(contact))
}

/// PUT /api/v1/contacts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContact>,
) -> AppResult<Json<Contact>> {
    let contact = ContactRepo::update(&state.pool, id, &input).await?;
    Ok(Json(contact))
}

/// DELETE /api/v1/contacts/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    ContactRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
