//! Route definitions for the Food Distribution Inventory Platform

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Warehouse management
        .nest("/warehouses", warehouse_routes())
        // Lot management
        .nest("/lots", lot_routes())
        // Purchase order management
        .nest("/orders", order_routes())
        // Product catalog
        .nest("/products", product_routes())
        // Supplier management
        .nest("/suppliers", supplier_routes())
        // Demand projections
        .nest("/projections", projection_routes())
        // Alert sweeps
        .nest("/alerts", alert_routes())
        // Statistics rollups
        .nest("/stats", stats_routes())
        // Product enum catalogs
        .route("/categories", get(handlers::list_categories))
        .route("/units", get(handlers::list_units))
}

/// Warehouse management routes
fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_warehouses).post(handlers::create_warehouse),
        )
        .route(
            "/:id",
            get(handlers::get_warehouse)
                .put(handlers::update_warehouse)
                .delete(handlers::delete_warehouse),
        )
        .route("/:id/availability", get(handlers::warehouse_availability))
        .route(
            "/:id/reserve/:quantity",
            patch(handlers::reserve_warehouse_quantity),
        )
        .route(
            "/:id/sell/:quantity",
            patch(handlers::sell_warehouse_quantity),
        )
}

/// Lot management routes
fn lot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_lots).post(handlers::create_lot))
        .route("/expired", get(handlers::expired_lots))
        .route(
            "/:id",
            get(handlers::get_lot)
                .put(handlers::update_lot)
                .delete(handlers::delete_lot),
        )
        .route("/:id/availability", get(handlers::lot_availability))
        .route(
            "/:id/reserve/:quantity",
            patch(handlers::reserve_lot_quantity),
        )
}

/// Purchase order routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route(
            "/:id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route("/:id/items", post(handlers::add_order_item))
        .route("/:id/submit", patch(handlers::submit_order))
        .route("/:id/approve", patch(handlers::approve_order))
        .route("/:id/send", patch(handlers::send_order))
        .route("/:id/receive", patch(handlers::receive_order))
        .route("/:id/cancel", patch(handlers::cancel_order))
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route("/refrigerated", get(handlers::refrigerated_products))
        .route("/barcode/:barcode", get(handlers::get_product_by_barcode))
        .route("/category/:category", get(handlers::products_by_category))
        .route(
            "/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/:id/stock", get(handlers::product_stock))
        .route("/:id/projections", get(handlers::product_projections))
}

/// Supplier management routes
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route("/specialty/:specialty", get(handlers::suppliers_by_specialty))
        .route(
            "/:id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route(
            "/:id/certifications",
            get(handlers::list_supplier_certifications)
                .post(handlers::add_supplier_certification),
        )
        .route("/:id/evaluations", post(handlers::add_supplier_evaluation))
        .route("/:id/stats", get(handlers::supplier_stats))
        .route("/:id/activate", patch(handlers::activate_supplier))
        .route("/:id/suspend", patch(handlers::suspend_supplier))
        .route("/:id/orders/summary", get(handlers::supplier_order_summary))
}

/// Demand projection routes
fn projection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_projections).post(handlers::create_projection),
        )
        .route("/current", get(handlers::current_projections))
        .route(
            "/:id",
            get(handlers::get_projection)
                .put(handlers::update_projection)
                .delete(handlers::delete_projection),
        )
        .route("/:id/activate", patch(handlers::activate_projection))
        .route("/:id/archive", patch(handlers::archive_projection))
}

/// Alert sweep routes
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/expiry", get(handlers::expiry_alerts))
        .route("/certifications", get(handlers::certification_alerts))
        .route("/orders", get(handlers::order_alerts))
        .route("/demand", get(handlers::demand_alerts))
}

/// Statistics rollup routes
fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(handlers::order_stats))
        .route("/products", get(handlers::product_stats))
        .route("/suppliers", get(handlers::supplier_overall_stats))
        .route("/projections", get(handlers::projection_stats))
}
