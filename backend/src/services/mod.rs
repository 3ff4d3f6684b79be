//! Business logic services for the Food Distribution Inventory Platform

pub mod lot;
pub mod order;
pub mod product;
pub mod projection;
pub mod supplier;
pub mod warehouse;

pub use lot::LotService;
pub use order::OrderService;
pub use product::ProductService;
pub use projection::ProjectionService;
pub use supplier::SupplierService;
pub use warehouse::WarehouseService;
