//! Route definitions for the `/photos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::photo;
use crate::state::AppState;

/// Routes mounted at `/photos`. Photo rows are immutable, so there is
/// no update route.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(photo::list).post(photo::create))
        .route("/{id}", get(photo::get_by_id).delete(photo::delete))
}
