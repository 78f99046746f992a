//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every validate-then-write
//! sequence (reference checks, uniqueness checks, dependent-usage checks,
//! composite creates) runs inside a single transaction so the checks are
//! atomic with the write they protect.

pub mod address_repo;
pub mod article_order_repo;
pub mod article_repo;
pub mod budget_repo;
pub mod client_repo;
pub mod contact_repo;
pub mod dedicated_time_repo;
pub mod order_repo;
pub mod payment_condition_repo;
pub mod photo_repo;
pub mod project_repo;
pub mod report_repo;
pub mod requirement_repo;
pub mod state_repo;
pub mod supplier_repo;
pub mod user_repo;

pub use address_repo::AddressRepo;
pub use article_order_repo::ArticleOrderRepo;
pub use article_repo::ArticleRepo;
pub use budget_repo::BudgetRepo;
pub use client_repo::ClientRepo;
pub use contact_repo::ContactRepo;
pub use dedicated_time_repo::DedicatedTimeRepo;
pub use order_repo::OrderRepo;
pub use payment_condition_repo::PaymentConditionRepo;
pub use photo_repo::PhotoRepo;
pub use project_repo::ProjectRepo;
pub use report_repo::ReportRepo;
pub use requirement_repo::RequirementRepo;
pub use state_repo::{
    ArticleOrderStatusRepo, ArticleOrderStatuses, ArticleStateRepo, ArticleStates,
    OrderStatusRepo, OrderStatuses, ProjectStateRepo, ProjectStates, RequirementStateRepo,
    RequirementStates, StateKind, StateRepo,
};
pub use supplier_repo::SupplierRepo;
pub use user_repo::UserRepo;
