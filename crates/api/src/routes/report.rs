//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(report::list).post(report::create))
        .route(
            "/{id}",
            get(report::get_by_id)
                .put(report::update)
                .delete(report::delete),
        )
}
