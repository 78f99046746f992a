//! Route definitions for the `/orders` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// POST   /with-articles  -> composite create (order + line items)
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(order::list).post(order::create))
        .route("/with-articles", post(order::create_with_articles))
        .route(
            "/{id}",
            get(order::get_by_id)
                .put(order::update)
                .delete(order::delete),
        )
}
