//! HTTP handlers for purchase order endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::today;
use crate::error::AppResult;
use crate::models::{LineItemWithTotals, OrderAlert, OrderFilter, OrderWithTotals, SupplierOrderSummary};
use crate::services::order::{
    AddItemInput, CreateOrderInput, OrderAlertThresholds, OrderService, OrderStatsReport,
    TransitionOutcome, UpdateOrderInput,
};
use crate::AppState;

fn service(state: &AppState) -> OrderService {
    OrderService::new(state.orders.clone(), state.order_numbers.clone())
}

/// Create a new purchase order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<(StatusCode, Json<OrderWithTotals>)> {
    let order = service(&state).create(input, today())?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Add a line item to an order
pub async fn add_order_item(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<AddItemInput>,
) -> AppResult<(StatusCode, Json<LineItemWithTotals>)> {
    let item = service(&state).add_item(order_id, input)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// List orders with optional filters
pub async fn list_orders(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<Vec<OrderWithTotals>>> {
    Ok(Json(service(&state).list(&filter)))
}

/// Get an order by ID
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<OrderWithTotals>> {
    Ok(Json(service(&state).get(order_id)?))
}

/// Update an order
pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<UpdateOrderInput>,
) -> AppResult<Json<OrderWithTotals>> {
    Ok(Json(service(&state).update(order_id, input)?))
}

/// Delete an order (drafts only)
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    service(&state).delete(order_id)?;
    Ok(Json(serde_json::json!({
        "message": format!("Order {} deleted", order_id)
    })))
}

/// Submit a draft order for approval
pub async fn submit_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<TransitionOutcome>> {
    Ok(Json(service(&state).submit(order_id)?))
}

/// Approve an order
pub async fn approve_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<TransitionOutcome>> {
    Ok(Json(service(&state).approve(order_id)?))
}

/// Send an approved order to the supplier
pub async fn send_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<TransitionOutcome>> {
    Ok(Json(service(&state).send(order_id)?))
}

/// Mark a sent order as received
pub async fn receive_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<TransitionOutcome>> {
    Ok(Json(service(&state).receive(order_id)?))
}

/// Query parameters for cancelling an order
#[derive(Debug, Deserialize)]
pub struct CancelOrderQuery {
    pub reason: Option<String>,
}

/// Cancel an order
pub async fn cancel_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Query(query): Query<CancelOrderQuery>,
) -> AppResult<Json<TransitionOutcome>> {
    Ok(Json(service(&state).cancel(order_id, query.reason)?))
}

/// Order rollup for one supplier
pub async fn supplier_order_summary(
    State(state): State<AppState>,
    Path(supplier_id): Path<String>,
) -> AppResult<Json<SupplierOrderSummary>> {
    Ok(Json(service(&state).supplier_summary(&supplier_id)?))
}

/// Delivery delay and stale approval alerts
pub async fn order_alerts(State(state): State<AppState>) -> AppResult<Json<Vec<OrderAlert>>> {
    let thresholds = OrderAlertThresholds {
        pending_approval_days: state.config.alerts.pending_approval_days,
        delivery_delay_high_days: state.config.alerts.delivery_delay_high_days,
    };
    Ok(Json(service(&state).alerts(thresholds, today())))
}

/// Order statistics rollup
pub async fn order_stats(State(state): State<AppState>) -> AppResult<Json<OrderStatsReport>> {
    Ok(Json(service(&state).stats()))
}
