//! Integration tests for entity CRUD flows through the repositories:
//! partial updates, uniqueness re-validation, reference validation, and
//! guarded deletes.

use assert_matches::assert_matches;
use procura_core::error::CoreError;
use procura_core::types::DbId;
use procura_db::models::address::CreateAddress;
use procura_db::models::article::{CreateArticle, UpdateArticle};
use procura_db::models::budget::{CreateBudget, UpdateBudget};
use procura_db::models::client::{CreateClient, UpdateClient};
use procura_db::models::contact::{CreateContact, UpdateContact};
use procura_db::models::payment_condition::CreatePaymentCondition;
use procura_db::models::project::{CreateProject, UpdateProject};
use procura_db::models::state::CreateState;
use procura_db::models::supplier::CreateSupplier;
use procura_db::repositories::{
    AddressRepo, ArticleRepo, ArticleStateRepo, BudgetRepo, ClientRepo, ContactRepo,
    PaymentConditionRepo, ProjectRepo, ProjectStateRepo, SupplierRepo,
};
use procura_db::DbError;
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_client(name: &str) -> CreateClient {
    CreateClient { name: name.into() }
}

fn new_contact(client_id: DbId, name: &str) -> CreateContact {
    CreateContact {
        name: name.into(),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        phone: None,
        position: None,
        client_id,
    }
}

fn new_address() -> CreateAddress {
    CreateAddress {
        street: "Main St".into(),
        exterior_number: "12".into(),
        interior_number: None,
        neighborhood: "Centro".into(),
        postal_code: "06000".into(),
        city: "Springfield".into(),
        state: "ST".into(),
        country: "US".into(),
        notes: None,
    }
}

fn new_state(name: &str) -> CreateState {
    CreateState {
        name: name.into(),
        description: None,
        sort_order: None,
        active: None,
    }
}

async fn seed_article(pool: &PgPool) -> procura_db::models::article::Article {
    let state = ArticleStateRepo::create(pool, &new_state("Requested"))
        .await
        .unwrap();
    ArticleRepo::create(
        pool,
        &CreateArticle {
            requirement_id: None,
            requirement_consecutive: None,
            quantity: Decimal::new(105, 1),
            unit: "pcs".into(),
            brand: "Initial".into(),
            model: "M-1".into(),
            dimensions: "10x10".into(),
            state_id: state.id,
            notes: None,
        },
    )
    .await
    .unwrap()
}

async fn seed_supplier(pool: &PgPool, tax_id: &str) -> procura_db::models::supplier::Supplier {
    let address = AddressRepo::create(pool, &new_address()).await.unwrap();
    let condition = PaymentConditionRepo::create(
        pool,
        &CreatePaymentCondition {
            name: format!("Net 30 {tax_id}"),
            description: None,
            text: "30 days net".into(),
            active: None,
        },
    )
    .await
    .unwrap();
    SupplierRepo::create(
        pool,
        &CreateSupplier {
            name: "Supplies Inc".into(),
            tax_id: tax_id.into(),
            address_id: address.id,
            bank_details: "IBAN 123".into(),
            delivery_time: "2 weeks".into(),
            payment_condition_id: condition.id,
            currency: "USD".into(),
            notes: None,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_client_name_rejected_on_create(pool: PgPool) {
    ClientRepo::create(&pool, &new_client("Client One"))
        .await
        .unwrap();
    let err = ClientRepo::create(&pool, &new_client("Client One"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::DuplicateValue { field: "name", .. })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn rename_to_taken_name_fails_and_leaves_value_unchanged(pool: PgPool) {
    ClientRepo::create(&pool, &new_client("Client One"))
        .await
        .unwrap();
    let b = ClientRepo::create(&pool, &new_client("Client Two"))
        .await
        .unwrap();

    let err = ClientRepo::update(
        &pool,
        b.id,
        &UpdateClient {
            name: Some("Client One".into()),
        },
    )
    .await
    .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::DuplicateValue { field: "name", .. })
    );

    let unchanged = ClientRepo::find_by_id(&pool, b.id).await.unwrap().unwrap();
    assert_eq!(unchanged.name, "Client Two");
}

#[sqlx::test(migrations = "./migrations")]
async fn rename_to_own_name_is_not_a_conflict(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Stable"))
        .await
        .unwrap();
    let updated = ClientRepo::update(
        &pool,
        client.id,
        &UpdateClient {
            name: Some("Stable".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Stable");
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn partial_update_touches_only_provided_fields(pool: PgPool) {
    let article = seed_article(&pool).await;

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let updated = ArticleRepo::update(
        &pool,
        article.id,
        &UpdateArticle {
            brand: Some("Replacement".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.brand, "Replacement");
    // Everything else is bit-for-bit what it was.
    assert_eq!(updated.quantity, article.quantity);
    assert_eq!(updated.unit, article.unit);
    assert_eq!(updated.model, article.model);
    assert_eq!(updated.dimensions, article.dimensions);
    assert_eq!(updated.state_id, article.state_id);
    assert_eq!(updated.notes, article.notes);
    assert_eq!(updated.requirement_id, article.requirement_id);
    // Timestamp bookkeeping.
    assert_eq!(updated.created_at, article.created_at);
    assert!(updated.updated_at > article.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn explicit_null_clears_nullable_field(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Acme"))
        .await
        .unwrap();
    let contact = ContactRepo::create(&pool, &new_contact(client.id, "Ann"))
        .await
        .unwrap();
    assert!(contact.email.is_some());

    let updated = ContactRepo::update(
        &pool,
        contact.id,
        &UpdateContact {
            email: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.email, None);
    assert_eq!(updated.name, contact.name);
    assert_eq!(updated.client_id, contact.client_id);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_of_missing_row_reports_not_found(pool: PgPool) {
    let err = ClientRepo::update(
        &pool,
        424242,
        &UpdateClient {
            name: Some("Ghost".into()),
        },
    )
    .await
    .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::NotFound {
            entity: "Client",
            id: 424242,
        })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn update_with_dangling_reference_mutates_nothing(pool: PgPool) {
    let state = ProjectStateRepo::create(&pool, &new_state("Open"))
        .await
        .unwrap();
    let project = ProjectRepo::create(
        &pool,
        &CreateProject {
            number: "P-001".into(),
            name: "Plant".into(),
            description: None,
            date: None,
            state_id: state.id,
            responsible_id: None,
            client_id: None,
            budget_id: None,
        },
    )
    .await
    .unwrap();

    let err = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            name: Some("Renamed".into()),
            state_id: Some(424242),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::InvalidReference {
            field: "state_id",
            ..
        })
    );

    // All-or-nothing: the valid part of the patch was not applied either.
    let unchanged = ProjectRepo::find_by_id(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.name, "Plant");
    assert_eq!(unchanged.updated_at, project.updated_at);
}

// ---------------------------------------------------------------------------
// Reference validation on create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_with_dangling_reference_is_rejected(pool: PgPool) {
    let err = ContactRepo::create(&pool, &new_contact(424242, "Orphan"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::InvalidReference {
            field: "client_id",
            id: 424242,
        })
    );
}

// ---------------------------------------------------------------------------
// Guarded deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn address_delete_blocked_while_supplier_references_it(pool: PgPool) {
    let supplier = seed_supplier(&pool, "TAX-1").await;

    let err = AddressRepo::delete(&pool, supplier.address_id)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::EntityInUse {
            entity: "Address",
            dependent: "Supplier",
            ..
        })
    );

    // The address is still queryable afterwards.
    let still_there = AddressRepo::find_by_id(&pool, supplier.address_id)
        .await
        .unwrap();
    assert!(still_there.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_succeeds_after_dependents_are_removed(pool: PgPool) {
    let supplier = seed_supplier(&pool, "TAX-2").await;
    let address_id = supplier.address_id;

    SupplierRepo::delete(&pool, supplier.id).await.unwrap();
    AddressRepo::delete(&pool, address_id).await.unwrap();

    assert!(AddressRepo::find_by_id(&pool, address_id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn state_delete_blocked_while_in_use(pool: PgPool) {
    let article = seed_article(&pool).await;

    let err = ArticleStateRepo::delete(&pool, article.state_id)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::EntityInUse {
            entity: "ArticleState",
            dependent: "Article",
            ..
        })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_of_missing_row_reports_not_found(pool: PgPool) {
    let err = ClientRepo::delete(&pool, 424242).await.unwrap_err();
    assert_matches!(err, DbError::Domain(CoreError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Budget / contact / client agreement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn budget_contact_must_belong_to_budget_client(pool: PgPool) {
    let client_a = ClientRepo::create(&pool, &new_client("A")).await.unwrap();
    let client_b = ClientRepo::create(&pool, &new_client("B")).await.unwrap();
    let contact_b = ContactRepo::create(&pool, &new_contact(client_b.id, "Bea"))
        .await
        .unwrap();

    let err = BudgetRepo::create(
        &pool,
        &CreateBudget {
            number: 1,
            name: "Mismatch".into(),
            client_id: client_a.id,
            contact_id: contact_b.id,
            delivery_date: chrono::Utc::now(),
        },
    )
    .await
    .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::InvalidReference {
            field: "contact_id",
            ..
        })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn budget_update_revalidates_pairing_on_client_change(pool: PgPool) {
    let client_a = ClientRepo::create(&pool, &new_client("A")).await.unwrap();
    let client_b = ClientRepo::create(&pool, &new_client("B")).await.unwrap();
    let contact_a = ContactRepo::create(&pool, &new_contact(client_a.id, "Ann"))
        .await
        .unwrap();

    let budget = BudgetRepo::create(
        &pool,
        &CreateBudget {
            number: 7,
            name: "Budget".into(),
            client_id: client_a.id,
            contact_id: contact_a.id,
            delivery_date: chrono::Utc::now(),
        },
    )
    .await
    .unwrap();

    // Moving the budget to client B while keeping A's contact breaks the
    // pairing and must be refused.
    let err = BudgetRepo::update(
        &pool,
        budget.id,
        &UpdateBudget {
            client_id: Some(client_b.id),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::InvalidReference {
            field: "contact_id",
            ..
        })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn contact_repoint_blocked_while_budget_references_it(pool: PgPool) {
    let client_a = ClientRepo::create(&pool, &new_client("A")).await.unwrap();
    let client_b = ClientRepo::create(&pool, &new_client("B")).await.unwrap();
    let contact = ContactRepo::create(&pool, &new_contact(client_a.id, "Ann"))
        .await
        .unwrap();
    BudgetRepo::create(
        &pool,
        &CreateBudget {
            number: 9,
            name: "Pinned".into(),
            client_id: client_a.id,
            contact_id: contact.id,
            delivery_date: chrono::Utc::now(),
        },
    )
    .await
    .unwrap();

    let err = ContactRepo::update(
        &pool,
        contact.id,
        &UpdateContact {
            client_id: Some(client_b.id),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::EntityInUse {
            entity: "Contact",
            dependent: "Budget",
            ..
        })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn budget_links_to_at_most_one_project(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("A")).await.unwrap();
    let contact = ContactRepo::create(&pool, &new_contact(client.id, "Ann"))
        .await
        .unwrap();
    let budget = BudgetRepo::create(
        &pool,
        &CreateBudget {
            number: 11,
            name: "Shared".into(),
            client_id: client.id,
            contact_id: contact.id,
            delivery_date: chrono::Utc::now(),
        },
    )
    .await
    .unwrap();
    let state = ProjectStateRepo::create(&pool, &new_state("Open"))
        .await
        .unwrap();

    let make_project = |number: &str| CreateProject {
        number: number.into(),
        name: "Plant".into(),
        description: None,
        date: None,
        state_id: state.id,
        responsible_id: None,
        client_id: Some(client.id),
        budget_id: Some(budget.id),
    };

    ProjectRepo::create(&pool, &make_project("P-001"))
        .await
        .unwrap();
    let err = ProjectRepo::create(&pool, &make_project("P-002"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Domain(CoreError::DuplicateValue {
            field: "budget_id",
            ..
        })
    );
}
