//! Handlers for the `/suppliers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::supplier::{CreateSupplier, Supplier, UpdateSupplier};
use procura_db::repositories::SupplierRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/suppliers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplier>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let supplier = SupplierRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// GET /api/v1/suppliers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Supplier>>> {
    let suppliers = SupplierRepo::list(&state.pool).await?;
    Ok(Json(suppliers))
}

/// GET /api/v1/suppliers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Supplier>> {
    let supplier = SupplierRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Supplier", id))?;
    Ok(Json(supplier))
}

/// PUT /api/v1/suppliers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSupplier>,
) -> AppResult<Json<Supplier>> {
    let supplier = SupplierRepo::update(&state.pool, id, &input).await?;
    Ok(Json(supplier))
}

/// DELETE /api/v1/suppliers/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    SupplierRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
