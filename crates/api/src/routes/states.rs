//! Route definitions shared by the five state/status lookup resources.

use axum::routing::get;
use axum::Router;
use procura_db::repositories::StateKind;

use crate::handlers::state;
use crate::state::AppState;

/// CRUD routes for one lookup resource.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router<K: StateKind>() -> Router<AppState> {
    Router::new()
        .route("/", get(state::list::<K>).post(state::create::<K>))
        .route(
            "/{id}",
            get(state::get_by_id::<K>)
                .put(state::update::<K>)
                .delete(state::delete::<K>),
        )
}
