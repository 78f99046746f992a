//! HTTP-level integration tests for the entity CRUD endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Client CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_client_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/clients",
        serde_json::json!({"name": "Test Client"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Test Client");
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_client_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/clients/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_client_name_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/clients", serde_json::json!({"name": "Dup"})).await;

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/clients", serde_json::json!({"name": "Dup"})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "DUPLICATE_VALUE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_reference_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/contacts",
        serde_json::json!({"name": "Orphan", "client_id": 999999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_REFERENCE");
    assert!(json["error"].as_str().unwrap().contains("client_id"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_partial_update_preserves_unprovided_fields(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/clients",
        serde_json::json!({"name": "Acme"}),
    )
    .await;
    let client = body_json(create_resp).await;
    let client_id = client["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/contacts",
        serde_json::json!({
            "name": "Ann",
            "email": "ann@example.com",
            "client_id": client_id,
        }),
    )
    .await;
    let contact = body_json(create_resp).await;
    let contact_id = contact["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/contacts/{contact_id}"),
        serde_json::json!({"phone": "555-0100"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["phone"], "555-0100");
    // Untouched attributes survive the patch.
    assert_eq!(json["email"], "ann@example.com");
    assert_eq!(json["name"], "Ann");
    assert_eq!(json["created_at"], contact["created_at"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_explicit_null_clears_field(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let client = body_json(
        post_json(
            app,
            "/api/v1/clients",
            serde_json::json!({"name": "Acme"}),
        )
        .await,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let contact = body_json(
        post_json(
            app,
            "/api/v1/contacts",
            serde_json::json!({
                "name": "Ann",
                "email": "ann@example.com",
                "client_id": client["id"],
            }),
        )
        .await,
    )
    .await;
    let contact_id = contact["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(
        put_json(
            app,
            &format!("/api/v1/contacts/{contact_id}"),
            serde_json::json!({"email": null}),
        )
        .await,
    )
    .await;
    assert_eq!(json["email"], serde_json::Value::Null);
    assert_eq!(json["name"], "Ann");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_referenced_client_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let client = body_json(
        post_json(
            app,
            "/api/v1/clients",
            serde_json::json!({"name": "Held"}),
        )
        .await,
    )
    .await;
    let client_id = client["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/contacts",
        serde_json::json!({"name": "Ann", "client_id": client_id}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/clients/{client_id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "ENTITY_IN_USE");
    assert!(json["error"].as_str().unwrap().contains("Contact"));

    // The client is still there.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/clients/{client_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_then_get_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let client = body_json(
        post_json(
            app,
            "/api/v1/clients",
            serde_json::json!({"name": "Gone"}),
        )
        .await,
    )
    .await;
    let client_id = client["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/clients/{client_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/clients/{client_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Lookup resources (generic state repository)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lookup_state_crud_roundtrip(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/project-states",
        serde_json::json!({"name": "Open", "sort_order": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let state = body_json(response).await;
    assert_eq!(state["name"], "Open");
    assert_eq!(state["active"], true);
    let state_id = state["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        put_json(
            app,
            &format!("/api/v1/project-states/{state_id}"),
            serde_json::json!({"active": false}),
        )
        .await,
    )
    .await;
    assert_eq!(json["active"], false);
    assert_eq!(json["name"], "Open");

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/project-states/{state_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lookup_state_names_are_scoped_per_table(pool: PgPool) {
    // The same name may exist in different lookup tables.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/project-states",
        serde_json::json!({"name": "Open"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/requirement-states",
        serde_json::json!({"name": "Open"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // But not twice in the same table.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/project-states",
        serde_json::json!({"name": "Open"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
