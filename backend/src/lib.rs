//! Food Distribution Inventory Platform - Backend
//!
//! Six inventory domains (warehouses, lots, purchase orders, products,
//! suppliers, demand projections) served from one process over in-memory
//! stores.

use std::sync::Arc;

use axum::{routing::get, Router};
use rust_decimal::Decimal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use external::{FixedPurchaseHistory, FixedStockLookup, PurchaseHistoryLookup, StockLookup};
use models::{Lot, Product, Projection, PurchaseOrder, Supplier, Warehouse};
use store::{OrderSequence, Store};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub warehouses: Store<Warehouse>,
    pub lots: Store<Lot>,
    pub orders: Store<PurchaseOrder>,
    pub products: Store<Product>,
    pub suppliers: Store<Supplier>,
    pub projections: Store<Projection>,
    pub order_numbers: OrderSequence,
    pub stock: Arc<dyn StockLookup>,
    pub purchase_history: Arc<dyn PurchaseHistoryLookup>,
}

impl AppState {
    /// Build fresh empty stores and the stubbed collaborators from the
    /// configured figures.
    pub fn new(config: Config) -> Self {
        let stock: Arc<dyn StockLookup> =
            Arc::new(FixedStockLookup::new(config.collaborators.stock_on_hand));
        let purchase_history: Arc<dyn PurchaseHistoryLookup> = Arc::new(FixedPurchaseHistory::new(
            config.collaborators.supplier_total_orders,
            config.collaborators.supplier_pending_orders,
            Decimal::from(config.collaborators.supplier_purchase_amount),
        ));

        Self {
            config: Arc::new(config),
            warehouses: Store::new(),
            lots: Store::new(),
            orders: Store::new(),
            products: Store::new(),
            suppliers: Store::new(),
            projections: Store::new(),
            order_numbers: OrderSequence::new(),
            stock,
            purchase_history,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
