//! Handlers for the `/payment-conditions` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::payment_condition::{
    CreatePaymentCondition, PaymentCondition, UpdatePaymentCondition,
};
use procura_db::repositories::PaymentConditionRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/payment-conditions
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePaymentCondition>,
) -> AppResult<(StatusCode, Json<PaymentCondition>)> {
    let condition = PaymentConditionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(condition)))
}

/// GET /api/v1/payment-conditions
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<PaymentCondition>>> {
    let conditions = PaymentConditionRepo::list(&state.pool).await?;
    Ok(Json(conditions))
}

/// GET /api/v1/payment-conditions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PaymentCondition>> {
    let condition = PaymentConditionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("PaymentCondition", id))?;
    Ok(Json(condition))
}

/// PUT /api/v1/payment-conditions/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePaymentCondition>,
) -> AppResult<Json<PaymentCondition>> {
    let condition = PaymentConditionRepo::update(&state.pool, id, &input).await?;
    Ok(Json(condition))
}

/// DELETE /api/v1/payment-conditions/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    PaymentConditionRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
