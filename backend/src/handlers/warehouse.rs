//! HTTP handlers for warehouse management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Warehouse, WarehouseAvailability, WarehouseFilter};
use crate::services::warehouse::{
    CreateWarehouseInput, ReserveOutcome, SellOutcome, UpdateWarehouseInput, WarehouseService,
};
use crate::AppState;

/// Create a new warehouse
pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(input): Json<CreateWarehouseInput>,
) -> AppResult<(StatusCode, Json<Warehouse>)> {
    let service = WarehouseService::new(state.warehouses.clone());
    let warehouse = service.create(input)?;
    Ok((StatusCode::CREATED, Json(warehouse)))
}

/// List warehouses with optional filters
pub async fn list_warehouses(
    State(state): State<AppState>,
    Query(filter): Query<WarehouseFilter>,
) -> AppResult<Json<Vec<Warehouse>>> {
    let service = WarehouseService::new(state.warehouses.clone());
    Ok(Json(service.list(&filter)))
}

/// Get a warehouse by ID
pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(warehouse_id): Path<Uuid>,
) -> AppResult<Json<Warehouse>> {
    let service = WarehouseService::new(state.warehouses.clone());
    Ok(Json(service.get(warehouse_id)?))
}

/// Update a warehouse
pub async fn update_warehouse(
    State(state): State<AppState>,
    Path(warehouse_id): Path<Uuid>,
    Json(input): Json<UpdateWarehouseInput>,
) -> AppResult<Json<Warehouse>> {
    let service = WarehouseService::new(state.warehouses.clone());
    Ok(Json(service.update(warehouse_id, input)?))
}

/// Delete a warehouse
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(warehouse_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = WarehouseService::new(state.warehouses.clone());
    service.delete(warehouse_id)?;
    Ok(Json(serde_json::json!({
        "message": format!("Warehouse {} deleted", warehouse_id)
    })))
}

/// Availability report for a warehouse
pub async fn warehouse_availability(
    State(state): State<AppState>,
    Path(warehouse_id): Path<Uuid>,
) -> AppResult<Json<WarehouseAvailability>> {
    let service = WarehouseService::new(state.warehouses.clone());
    Ok(Json(service.availability(warehouse_id)?))
}

/// Reserve a quantity in a warehouse
pub async fn reserve_warehouse_quantity(
    State(state): State<AppState>,
    Path((warehouse_id, quantity)): Path<(Uuid, i64)>,
) -> AppResult<Json<ReserveOutcome>> {
    let service = WarehouseService::new(state.warehouses.clone());
    Ok(Json(service.reserve(warehouse_id, quantity)?))
}

/// Sell a previously reserved quantity
pub async fn sell_warehouse_quantity(
    State(state): State<AppState>,
    Path((warehouse_id, quantity)): Path<(Uuid, i64)>,
) -> AppResult<Json<SellOutcome>> {
    let service = WarehouseService::new(state.warehouses.clone());
    Ok(Json(service.sell(warehouse_id, quantity)?))
}
