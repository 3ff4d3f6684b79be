//! HTTP handlers for demand projection endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::today;
use crate::error::AppResult;
use crate::models::{DemandAlert, ProductProjectionSummary, ProjectionFilter, ProjectionWithMetrics};
use crate::services::projection::{
    CreateProjectionInput, ProjectionService, ProjectionStateOutcome, ProjectionStatsReport,
    UpdateProjectionInput,
};
use crate::AppState;

/// Create a new demand projection
pub async fn create_projection(
    State(state): State<AppState>,
    Json(input): Json<CreateProjectionInput>,
) -> AppResult<(StatusCode, Json<ProjectionWithMetrics>)> {
    let service = ProjectionService::new(state.projections.clone());
    let projection = service.create(input)?;
    Ok((StatusCode::CREATED, Json(projection)))
}

/// List projections with optional filters
pub async fn list_projections(
    State(state): State<AppState>,
    Query(filter): Query<ProjectionFilter>,
) -> AppResult<Json<Vec<ProjectionWithMetrics>>> {
    let service = ProjectionService::new(state.projections.clone());
    Ok(Json(service.list(&filter)))
}

/// Get a projection by ID
pub async fn get_projection(
    State(state): State<AppState>,
    Path(projection_id): Path<Uuid>,
) -> AppResult<Json<ProjectionWithMetrics>> {
    let service = ProjectionService::new(state.projections.clone());
    Ok(Json(service.get(projection_id)?))
}

/// Update a projection
pub async fn update_projection(
    State(state): State<AppState>,
    Path(projection_id): Path<Uuid>,
    Json(input): Json<UpdateProjectionInput>,
) -> AppResult<Json<ProjectionWithMetrics>> {
    let service = ProjectionService::new(state.projections.clone());
    Ok(Json(service.update(projection_id, input)?))
}

/// Delete a projection
pub async fn delete_projection(
    State(state): State<AppState>,
    Path(projection_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let service = ProjectionService::new(state.projections.clone());
    service.delete(projection_id)?;
    Ok(Json(serde_json::json!({
        "message": format!("Projection {} deleted", projection_id)
    })))
}

/// Activate a projection
pub async fn activate_projection(
    State(state): State<AppState>,
    Path(projection_id): Path<Uuid>,
) -> AppResult<Json<ProjectionStateOutcome>> {
    let service = ProjectionService::new(state.projections.clone());
    Ok(Json(service.activate(projection_id)?))
}

/// Archive a projection
pub async fn archive_projection(
    State(state): State<AppState>,
    Path(projection_id): Path<Uuid>,
) -> AppResult<Json<ProjectionStateOutcome>> {
    let service = ProjectionService::new(state.projections.clone());
    Ok(Json(service.archive(projection_id)?))
}

/// Active projections whose window covers today
pub async fn current_projections(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProjectionWithMetrics>>> {
    let service = ProjectionService::new(state.projections.clone());
    Ok(Json(service.current(today())))
}

/// All projections of one product with an aggregated rollup
pub async fn product_projections(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ProductProjectionSummary>> {
    let service = ProjectionService::new(state.projections.clone());
    Ok(Json(service.product_summary(&product_id)?))
}

/// Demand alerts for in-window active projections
pub async fn demand_alerts(State(state): State<AppState>) -> AppResult<Json<Vec<DemandAlert>>> {
    let service = ProjectionService::new(state.projections.clone());
    Ok(Json(service.demand_alerts(state.stock.as_ref(), today())))
}

/// Projection statistics rollup
pub async fn projection_stats(
    State(state): State<AppState>,
) -> AppResult<Json<ProjectionStatsReport>> {
    let service = ProjectionService::new(state.projections.clone());
    Ok(Json(service.stats()))
}
