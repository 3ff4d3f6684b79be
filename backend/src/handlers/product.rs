//! HTTP handlers for product catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Product, ProductCategory, ProductFilter, ProductStock, UnitOfMeasure};
use crate::services::product::{
    CreateProductInput, DeactivateOutcome, ProductService, ProductStatsReport, UpdateProductInput,
};
use crate::AppState;

/// Create a new product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = ProductService::new(state.products.clone());
    let product = service.create(input)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// List products with optional filters (active only by default)
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.products.clone());
    Ok(Json(service.list(&filter)))
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.products.clone());
    Ok(Json(service.get(product_id)?))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.products.clone());
    Ok(Json(service.update(product_id, input)?))
}

/// Soft-delete a product (deactivate)
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<DeactivateOutcome>> {
    let service = ProductService::new(state.products.clone());
    Ok(Json(service.deactivate(product_id)?))
}

/// Find a product by barcode
pub async fn get_product_by_barcode(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.products.clone());
    Ok(Json(service.by_barcode(&barcode)?))
}

/// Active products of one category
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(category): Path<ProductCategory>,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.products.clone());
    Ok(Json(service.by_category(category)))
}

/// Active products that require refrigeration
pub async fn refrigerated_products(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.products.clone());
    Ok(Json(service.refrigerated()))
}

/// Stock report for one product
pub async fn product_stock(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ProductStock>> {
    let service = ProductService::new(state.products.clone());
    Ok(Json(service.stock(product_id, state.stock.as_ref())?))
}

/// Product category catalog
pub async fn list_categories() -> Json<serde_json::Value> {
    let categories: Vec<&str> = ProductCategory::ALL.iter().map(|c| c.as_str()).collect();
    Json(serde_json::json!({
        "categories": categories,
        "total": categories.len()
    }))
}

/// Unit-of-measure catalog
pub async fn list_units() -> Json<serde_json::Value> {
    let units: Vec<&str> = UnitOfMeasure::ALL.iter().map(|u| u.as_str()).collect();
    Json(serde_json::json!({
        "units": units,
        "total": units.len()
    }))
}

/// Product statistics rollup
pub async fn product_stats(State(state): State<AppState>) -> AppResult<Json<ProductStatsReport>> {
    let service = ProductService::new(state.products.clone());
    Ok(Json(service.stats()))
}
