//! Handlers for the `/orders` resource, including the composite
//! order-with-articles create.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use procura_core::types::DbId;
use procura_db::models::order::{
    CreateOrder, CreateOrderWithArticles, Order, OrderWithArticles, UpdateOrder,
};
use procura_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/orders
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = OrderRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// POST /api/v1/orders/with-articles
///
/// Creates the order and all line items atomically; a validation failure
/// anywhere leaves nothing behind.
pub async fn create_with_articles(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderWithArticles>,
) -> AppResult<(StatusCode, Json<OrderWithArticles>)> {
    let created = OrderRepo::create_with_articles(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/orders
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderRepo::list(&state.pool).await?;
    Ok(Json(orders))
}

/// GET /api/v1/orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Order>> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Order", id))?;
    Ok(Json(order))
}

/// PUT /api/v1/orders/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrder>,
) -> AppResult<Json<Order>> {
    let order = OrderRepo::update(&state.pool, id, &input).await?;
    Ok(Json(order))
}

/// DELETE /api/v1/orders/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    OrderRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
