//! Route definitions for the `/budgets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::budget;
use crate::state::AppState;

/// Routes mounted at `/budgets`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(budget::list).post(budget::create))
        .route(
            "/{id}",
            get(budget::get_by_id)
                .put(budget::update)
                .delete(budget::delete),
        )
}
