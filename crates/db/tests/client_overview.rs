//! Integration tests for the client overview: bounded, newest-first
//! slices of projects, contacts and budgets for one client.

use chrono::{Duration, Utc};
use procura_core::types::DbId;
use procura_db::models::budget::CreateBudget;
use procura_db::models::client::CreateClient;
use procura_db::models::contact::CreateContact;
use procura_db::models::project::CreateProject;
use procura_db::models::state::CreateState;
use procura_db::repositories::{
    BudgetRepo, ClientRepo, ContactRepo, ProjectRepo, ProjectStateRepo,
};
use sqlx::PgPool;

async fn seed_client(pool: &PgPool, name: &str) -> DbId {
    ClientRepo::create(pool, &CreateClient { name: name.into() })
        .await
        .unwrap()
        .id
}

async fn seed_project_state(pool: &PgPool) -> DbId {
    ProjectStateRepo::create(
        pool,
        &CreateState {
            name: "Open".into(),
            description: None,
            sort_order: None,
            active: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "./migrations")]
async fn overview_returns_five_newest_projects_in_date_order(pool: PgPool) {
    let client_id = seed_client(&pool, "Acme").await;
    let state_id = seed_project_state(&pool).await;

    // Six projects dated day-1 .. day-6 (oldest first).
    let base = Utc::now();
    for day in 1..=6 {
        ProjectRepo::create(
            &pool,
            &CreateProject {
                number: format!("P-{day:03}"),
                name: format!("Project {day}"),
                description: None,
                date: Some(base - Duration::days(7 - day)),
                state_id,
                responsible_id: None,
                client_id: Some(client_id),
                budget_id: None,
            },
        )
        .await
        .unwrap();
    }

    let overview = ClientRepo::overview(&pool, client_id)
        .await
        .unwrap()
        .unwrap();

    // Exactly five, newest first: day-6 down to day-2.
    let numbers: Vec<&str> = overview
        .latest_projects
        .iter()
        .map(|p| p.number.as_str())
        .collect();
    assert_eq!(numbers, ["P-006", "P-005", "P-004", "P-003", "P-002"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn overview_slices_contacts_and_budgets_newest_first(pool: PgPool) {
    let client_id = seed_client(&pool, "Acme").await;

    let mut contact_ids = Vec::new();
    for i in 0..3 {
        let contact = ContactRepo::create(
            &pool,
            &CreateContact {
                name: format!("Contact {i}"),
                email: None,
                phone: None,
                position: None,
                client_id,
            },
        )
        .await
        .unwrap();
        contact_ids.push(contact.id);
    }

    let mut budget_ids = Vec::new();
    for i in 0..3 {
        let budget = BudgetRepo::create(
            &pool,
            &CreateBudget {
                number: i,
                name: format!("Budget {i}"),
                client_id,
                contact_id: contact_ids[0],
                delivery_date: Utc::now(),
            },
        )
        .await
        .unwrap();
        budget_ids.push(budget.id);
    }

    let overview = ClientRepo::overview(&pool, client_id)
        .await
        .unwrap()
        .unwrap();

    // Creation order reversed; equal timestamps fall back to id desc,
    // which yields the same ordering.
    let got_contacts: Vec<DbId> = overview.latest_contacts.iter().map(|c| c.id).collect();
    contact_ids.reverse();
    assert_eq!(got_contacts, contact_ids);

    let got_budgets: Vec<DbId> = overview.latest_budgets.iter().map(|b| b.id).collect();
    budget_ids.reverse();
    assert_eq!(got_budgets, budget_ids);
}

#[sqlx::test(migrations = "./migrations")]
async fn overview_is_idempotent_without_intervening_writes(pool: PgPool) {
    let client_id = seed_client(&pool, "Acme").await;
    let state_id = seed_project_state(&pool).await;
    for day in 1..=3 {
        ProjectRepo::create(
            &pool,
            &CreateProject {
                number: format!("P-{day:03}"),
                name: format!("Project {day}"),
                description: None,
                date: Some(Utc::now() - Duration::days(day)),
                state_id,
                responsible_id: None,
                client_id: Some(client_id),
                budget_id: None,
            },
        )
        .await
        .unwrap();
    }

    let first = ClientRepo::overview(&pool, client_id)
        .await
        .unwrap()
        .unwrap();
    let second = ClientRepo::overview(&pool, client_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn overview_of_missing_client_is_none(pool: PgPool) {
    let overview = ClientRepo::overview(&pool, 424242).await.unwrap();
    assert!(overview.is_none());
}
