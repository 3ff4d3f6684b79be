//! Domain models for the Food Distribution Inventory Platform
//!
//! Re-exports the models from the shared crate.

pub use shared::models::*;
pub use shared::types::{GeoLocation, Priority};
