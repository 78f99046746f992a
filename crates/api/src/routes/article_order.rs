//! Route definitions for the `/article-orders` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::article_order;
use crate::state::AppState;

/// Routes mounted at `/article-orders`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(article_order::list).post(article_order::create))
        .route(
            "/{id}",
            get(article_order::get_by_id)
                .put(article_order::update)
                .delete(article_order::delete),
        )
}
