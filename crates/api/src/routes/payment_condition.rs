//! Route definitions for the `/payment-conditions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::payment_condition;
use crate::state::AppState;

/// Routes mounted at `/payment-conditions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(payment_condition::list).post(payment_condition::create),
        )
        .route(
            "/{id}",
            get(payment_condition::get_by_id)
                .put(payment_condition::update)
                .delete(payment_condition::delete),
        )
}
