//! HTTP-level integration tests for the composite create endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use sqlx::PgPool;

/// Create the referenced entities an order needs, returning
/// (supplier_id, payment_condition_id, address_id, status_id,
/// line_status_id).
async fn seed_order_chain(pool: &PgPool) -> (i64, i64, i64, i64, i64) {
    let app = common::build_test_app(pool.clone());
    let address = body_json(
        post_json(
            app,
            "/api/v1/addresses",
            serde_json::json!({
                "street": "Dock Rd",
                "exterior_number": "4",
                "neighborhood": "Port",
                "postal_code": "11111",
                "city": "Harbor",
                "state": "ST",
                "country": "US",
            }),
        )
        .await,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let condition = body_json(
        post_json(
            app,
            "/api/v1/payment-conditions",
            serde_json::json!({"name": "Net 15", "text": "15 days net"}),
        )
        .await,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let supplier = body_json(
        post_json(
            app,
            "/api/v1/suppliers",
            serde_json::json!({
                "name": "Bolts & Co",
                "tax_id": "TAX-9",
                "address_id": address["id"],
                "bank_details": "IBAN 987",
                "delivery_time": "1 week",
                "payment_condition_id": condition["id"],
                "currency": "USD",
            }),
        )
        .await,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let status = body_json(
        post_json(
            app,
            "/api/v1/order-statuses",
            serde_json::json!({"name": "Draft"}),
        )
        .await,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let line_status = body_json(
        post_json(
            app,
            "/api/v1/article-order-statuses",
            serde_json::json!({"name": "Pending"}),
        )
        .await,
    )
    .await;

    (
        supplier["id"].as_i64().unwrap(),
        condition["id"].as_i64().unwrap(),
        address["id"].as_i64().unwrap(),
        status["id"].as_i64().unwrap(),
        line_status["id"].as_i64().unwrap(),
    )
}

fn order_payload(
    supplier_id: i64,
    condition_id: i64,
    address_id: i64,
    status_id: i64,
) -> serde_json::Value {
    serde_json::json!({
        "supplier_id": supplier_id,
        "address": "Dock Rd 4, Harbor",
        "bank_details": "IBAN 987",
        "delivery_time": "1 week",
        "payment_condition_id": condition_id,
        "currency": "USD",
        "subtotal": "100.00",
        "vat": "16.00",
        "total": "116.00",
        "shipping_address_id": address_id,
        "status_id": status_id,
    })
}

fn line_payload(status_id: i64, position: i32) -> serde_json::Value {
    serde_json::json!({
        "status_id": status_id,
        "position": position,
        "quantity": "4",
        "unit": "pcs",
        "brand": "Generic",
        "model": "G-7",
        "unit_price": "25.00",
        "total": "100.00",
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_order_with_articles(pool: PgPool) {
    let (supplier_id, condition_id, address_id, status_id, line_status_id) =
        seed_order_chain(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/orders/with-articles",
        serde_json::json!({
            "order": order_payload(supplier_id, condition_id, address_id, status_id),
            "articles": [
                line_payload(line_status_id, 1),
                line_payload(line_status_id, 2),
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let order_id = json["order"]["id"].as_i64().unwrap();
    let articles = json["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["order_id"].as_i64().unwrap(), order_id);
    assert_eq!(articles[0]["position"], 1);
    assert_eq!(articles[1]["position"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_composite_create_leaves_nothing_on_failure(pool: PgPool) {
    let (supplier_id, condition_id, address_id, status_id, line_status_id) =
        seed_order_chain(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/orders/with-articles",
        serde_json::json!({
            "order": order_payload(supplier_id, condition_id, address_id, status_id),
            "articles": [
                line_payload(line_status_id, 1),
                line_payload(999999, 2),
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_REFERENCE");

    // No order and no line survived the rollback.
    let app = common::build_test_app(pool.clone());
    let orders = body_json(get(app, "/api/v1/orders").await).await;
    assert_eq!(orders.as_array().unwrap().len(), 0);

    let app = common::build_test_app(pool);
    let lines = body_json(get(app, "/api/v1/article-orders").await).await;
    assert_eq!(lines.as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_requirement_with_articles(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let req_state = body_json(
        post_json(
            app,
            "/api/v1/requirement-states",
            serde_json::json!({"name": "Open"}),
        )
        .await,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let article_state = body_json(
        post_json(
            app,
            "/api/v1/article-states",
            serde_json::json!({"name": "Requested"}),
        )
        .await,
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/requirements/with-articles",
        serde_json::json!({
            "requirement": {"state_id": req_state["id"]},
            "articles": [{
                "quantity": "2",
                "unit": "pcs",
                "brand": "B",
                "model": "M",
                "dimensions": "5x5",
                "state_id": article_state["id"],
            }],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let requirement_id = json["requirement"]["id"].as_i64().unwrap();
    let articles = json["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(
        articles[0]["requirement_id"].as_i64().unwrap(),
        requirement_id
    );
}
