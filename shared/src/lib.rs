//! Shared types and models for the Food Distribution Inventory Platform
//!
//! This crate contains the domain model: entities, state machines, derived
//! metrics and validation rules used by the backend services.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
