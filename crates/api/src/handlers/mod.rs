//! Request handlers, one module per resource.

pub mod address;
pub mod article;
pub mod article_order;
pub mod budget;
pub mod client;
pub mod contact;
pub mod dedicated_time;
pub mod order;
pub mod payment_condition;
pub mod photo;
pub mod project;
pub mod report;
pub mod requirement;
pub mod state;
pub mod supplier;
pub mod user;
