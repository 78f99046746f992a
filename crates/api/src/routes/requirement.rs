//! Route definitions for the `/requirements` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::requirement;
use crate::state::AppState;

/// Routes mounted at `/requirements`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// POST   /with-articles  -> composite create (requirement + articles)
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(requirement::list).post(requirement::create))
        .route("/with-articles", post(requirement::create_with_articles))
        .route(
            "/{id}",
            get(requirement::get_by_id)
                .put(requirement::update)
                .delete(requirement::delete),
        )
}
