//! Integration tests for the integrity components: reference validation,
//! uniqueness checks, and the dependent-usage guard.

use assert_matches::assert_matches;
use procura_core::error::CoreError;
use procura_db::integrity::{
    assert_not_referenced, assert_references, assert_unique, DependentCheck, ReferenceCheck,
};
use procura_db::models::client::CreateClient;
use procura_db::models::contact::CreateContact;
use procura_db::repositories::{ClientRepo, ContactRepo};
use procura_db::DbError;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn references_resolve_for_existing_rows(pool: PgPool) {
    let client = ClientRepo::create(
        &pool,
        &CreateClient {
            name: "Acme".into(),
        },
    )
    .await
    .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let checks = [
        ReferenceCheck::required("client_id", "clients", client.id),
        ReferenceCheck::optional("client_id", "clients", Some(client.id)),
    ];
    assert_references(&mut conn, &checks).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn absent_optional_reference_is_skipped(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let checks = [ReferenceCheck::optional("client_id", "clients", None)];
    assert_references(&mut conn, &checks).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn dangling_reference_names_the_offending_field(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let checks = [ReferenceCheck::required("client_id", "clients", 424242)];
    let err = assert_references(&mut conn, &checks).await.unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::InvalidReference {
            field: "client_id",
            id: 424242,
        })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn unique_check_detects_taken_value(pool: PgPool) {
    ClientRepo::create(
        &pool,
        &CreateClient {
            name: "Taken".into(),
        },
    )
    .await
    .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    let err = assert_unique(&mut conn, "clients", "name", "Taken".to_string(), None)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::DuplicateValue { field: "name", ref value }) if value == "Taken"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn unique_check_excludes_the_row_being_updated(pool: PgPool) {
    let client = ClientRepo::create(
        &pool,
        &CreateClient {
            name: "Self".into(),
        },
    )
    .await
    .unwrap();

    // The row's own value is not a conflict.
    let mut conn = pool.acquire().await.unwrap();
    assert_unique(
        &mut conn,
        "clients",
        "name",
        "Self".to_string(),
        Some(client.id),
    )
    .await
    .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn unique_check_passes_for_free_value(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    assert_unique(&mut conn, "clients", "name", "Free".to_string(), None)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn dependent_guard_blocks_while_rows_reference_the_target(pool: PgPool) {
    let client = ClientRepo::create(
        &pool,
        &CreateClient {
            name: "Guarded".into(),
        },
    )
    .await
    .unwrap();
    ContactRepo::create(
        &pool,
        &CreateContact {
            name: "Ann".into(),
            email: None,
            phone: None,
            position: None,
            client_id: client.id,
        },
    )
    .await
    .unwrap();

    let deps = [DependentCheck::new("Contact", "contacts", "client_id")];
    let mut conn = pool.acquire().await.unwrap();
    let err = assert_not_referenced(&mut conn, "Client", client.id, &deps)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::EntityInUse {
            entity: "Client",
            dependent: "Contact",
            ..
        })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn dependent_guard_passes_with_no_dependents(pool: PgPool) {
    let client = ClientRepo::create(
        &pool,
        &CreateClient {
            name: "Lonely".into(),
        },
    )
    .await
    .unwrap();

    let deps = [DependentCheck::new("Contact", "contacts", "client_id")];
    let mut conn = pool.acquire().await.unwrap();
    assert_not_referenced(&mut conn, "Client", client.id, &deps)
        .await
        .unwrap();
}
