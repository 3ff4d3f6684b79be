//! HTTP handlers for the Food Distribution Inventory Platform

pub mod health;
pub mod lot;
pub mod order;
pub mod product;
pub mod projection;
pub mod supplier;
pub mod warehouse;

pub use health::*;
pub use lot::*;
pub use order::*;
pub use product::*;
pub use projection::*;
pub use supplier::*;
pub use warehouse::*;

use chrono::NaiveDate;

/// The request-time calendar date every derived date computation uses.
pub(crate) fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
