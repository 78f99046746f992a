//! Route definitions for the `/dedicated-times` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dedicated_time;
use crate::state::AppState;

/// Routes mounted at `/dedicated-times`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(dedicated_time::list).post(dedicated_time::create),
        )
        .route(
            "/{id}",
            get(dedicated_time::get_by_id)
                .put(dedicated_time::update)
                .delete(dedicated_time::delete),
        )
}
