//! HTTP handlers for lot management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::today;
use crate::error::AppResult;
use crate::models::{ExpiryAlert, LotAvailability, LotFilter, LotWithExpiry};
use crate::services::lot::{CreateLotInput, LotReserveOutcome, LotService, UpdateLotInput};
use crate::AppState;

/// Create a new lot
pub async fn create_lot(
    State(state): State<AppState>,
    Json(input): Json<CreateLotInput>,
) -> AppResult<(StatusCode, Json<LotWithExpiry>)> {
    let service = LotService::new(state.lots.clone());
    let lot = service.create(input, today())?;
    Ok((StatusCode::CREATED, Json(lot)))
}

/// List lots with optional filters
pub async fn list_lots(
    State(state): State<AppState>,
    Query(filter): Query<LotFilter>,
) -> AppResult<Json<Vec<LotWithExpiry>>> {
    let service = LotService::new(state.lots.clone());
    Ok(Json(service.list(&filter, today())))
}

/// Get a lot by ID
pub async fn get_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
) -> AppResult<Json<LotWithExpiry>> {
    let service = LotService::new(state.lots.clone());
    Ok(Json(service.get(lot_id, today())?))
}

/// Update a lot
pub async fn update_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
    Json(input): Json<UpdateLotInput>,
) -> AppResult<Json<LotWithExpiry>> {
    let service = LotService::new(state.lots.clone());
    Ok(Json(service.update(lot_id, input, today())?))
}

/// Delete a lot
pub async fn delete_lot(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = LotService::new(state.lots.clone());
    service.delete(lot_id)?;
    Ok(Json(serde_json::json!({
        "message": format!("Lot {} deleted", lot_id)
    })))
}

/// Availability report for a lot
pub async fn lot_availability(
    State(state): State<AppState>,
    Path(lot_id): Path<Uuid>,
) -> AppResult<Json<LotAvailability>> {
    let service = LotService::new(state.lots.clone());
    Ok(Json(service.availability(lot_id, today())?))
}

/// Reserve a quantity from a lot
pub async fn reserve_lot_quantity(
    State(state): State<AppState>,
    Path((lot_id, quantity)): Path<(Uuid, i64)>,
) -> AppResult<Json<LotReserveOutcome>> {
    let service = LotService::new(state.lots.clone());
    Ok(Json(service.reserve(lot_id, quantity, today())?))
}

/// All lots past their expiry date
pub async fn expired_lots(State(state): State<AppState>) -> AppResult<Json<Vec<LotWithExpiry>>> {
    let service = LotService::new(state.lots.clone());
    Ok(Json(service.expired(today())))
}

/// Query parameters for the expiry alert sweep
#[derive(Debug, Deserialize)]
pub struct ExpiryAlertQuery {
    pub days_ahead: Option<i64>,
}

/// Lots approaching expiry, most urgent first
pub async fn expiry_alerts(
    State(state): State<AppState>,
    Query(query): Query<ExpiryAlertQuery>,
) -> AppResult<Json<Vec<ExpiryAlert>>> {
    let service = LotService::new(state.lots.clone());
    let days_ahead = query
        .days_ahead
        .unwrap_or(state.config.alerts.expiry_days_ahead);
    Ok(Json(service.expiry_alerts(days_ahead, today())))
}
