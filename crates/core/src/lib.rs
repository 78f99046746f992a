//! Shared building blocks for the procura workspace: scalar type aliases
//! and the domain error taxonomy every layer speaks.

pub mod error;
pub mod types;
