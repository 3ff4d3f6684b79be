//! External collaborator interfaces
//!
//! The platform's sibling systems (warehouse stock, purchase history) are
//! reached through capability traits so the shipped fixed-figure stubs can
//! be replaced by real integrations without touching the services.

pub mod orders;
pub mod stock;

pub use orders::{FixedPurchaseHistory, OrderHistory, PurchaseHistoryLookup};
pub use stock::{FixedStockLookup, StockLookup};
