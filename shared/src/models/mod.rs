//! Domain models for the Food Distribution Inventory Platform

mod lot;
mod order;
mod product;
mod projection;
mod supplier;
mod warehouse;

pub use lot::*;
pub use order::*;
pub use product::*;
pub use projection::*;
pub use supplier::*;
pub use warehouse::*;
