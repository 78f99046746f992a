pub mod address;
pub mod article;
pub mod article_order;
pub mod budget;
pub mod client;
pub mod contact;
pub mod dedicated_time;
pub mod health;
pub mod order;
pub mod payment_condition;
pub mod photo;
pub mod project;
pub mod report;
pub mod requirement;
pub mod states;
pub mod supplier;
pub mod user;

use axum::Router;
use procura_db::repositories::{
    ArticleOrderStatuses, ArticleStates, OrderStatuses, ProjectStates, RequirementStates,
};

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                       CRUD
/// /clients                     CRUD + /{id}/overview aggregate view
/// /contacts                    CRUD
/// /addresses                   CRUD
/// /suppliers                   CRUD
/// /payment-conditions          CRUD
/// /project-states              CRUD (lookup)
/// /requirement-states          CRUD (lookup)
/// /article-states              CRUD (lookup)
/// /order-statuses              CRUD (lookup)
/// /article-order-statuses      CRUD (lookup)
/// /projects                    CRUD
/// /requirements                CRUD + /with-articles composite create
/// /articles                    CRUD
/// /orders                      CRUD + /with-articles composite create
/// /article-orders              CRUD
/// /reports                     CRUD
/// /dedicated-times             CRUD
/// /photos                      create/read/delete
/// /budgets                     CRUD
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user::router())
        .nest("/clients", client::router())
        .nest("/contacts", contact::router())
        .nest("/addresses", address::router())
        .nest("/suppliers", supplier::router())
        .nest("/payment-conditions", payment_condition::router())
        .nest("/project-states", states::router::<ProjectStates>())
        .nest("/requirement-states", states::router::<RequirementStates>())
        .nest("/article-states", states::router::<ArticleStates>())
        .nest("/order-statuses", states::router::<OrderStatuses>())
        .nest(
            "/article-order-statuses",
            states::router::<ArticleOrderStatuses>(),
        )
        .nest("/projects", project::router())
        .nest("/requirements", requirement::router())
        .nest("/articles", article::router())
        .nest("/orders", order::router())
        .nest("/article-orders", article_order::router())
        .nest("/reports", report::router())
        .nest("/dedicated-times", dedicated_time::router())
        .nest("/photos", photo::router())
        .nest("/budgets", budget::router())
}
