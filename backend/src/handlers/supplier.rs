//! HTTP handlers for supplier management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::today;
use crate::error::AppResult;
use crate::models::{
    CertificationAlert, CertificationWithStatus, SupplierFilter, SupplierStats, SupplierView,
};
use crate::services::supplier::{
    AddCertificationInput, AddEvaluationInput, CreateSupplierInput, EvaluationOutcome,
    SupplierService, SupplierStateOutcome, SupplierStatsReport, UpdateSupplierInput,
};
use crate::AppState;

/// Create a new supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<(StatusCode, Json<SupplierView>)> {
    let service = SupplierService::new(state.suppliers.clone());
    let supplier = service.create(input, today())?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// List suppliers with optional filters
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(filter): Query<SupplierFilter>,
) -> AppResult<Json<Vec<SupplierView>>> {
    let service = SupplierService::new(state.suppliers.clone());
    Ok(Json(service.list(&filter, today())))
}

/// Get a supplier by ID
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<SupplierView>> {
    let service = SupplierService::new(state.suppliers.clone());
    Ok(Json(service.get(supplier_id, today())?))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<SupplierView>> {
    let service = SupplierService::new(state.suppliers.clone());
    Ok(Json(service.update(supplier_id, input, today())?))
}

/// Soft-delete a supplier (deactivate)
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<SupplierStateOutcome>> {
    let service = SupplierService::new(state.suppliers.clone());
    Ok(Json(service.deactivate(supplier_id)?))
}

/// Activate a supplier
pub async fn activate_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<SupplierStateOutcome>> {
    let service = SupplierService::new(state.suppliers.clone());
    Ok(Json(service.activate(supplier_id)?))
}

/// Query parameters for suspending a supplier
#[derive(Debug, Deserialize)]
pub struct SuspendSupplierQuery {
    pub reason: Option<String>,
}

/// Suspend a supplier
pub async fn suspend_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    Query(query): Query<SuspendSupplierQuery>,
) -> AppResult<Json<SupplierStateOutcome>> {
    let service = SupplierService::new(state.suppliers.clone());
    Ok(Json(service.suspend(supplier_id, query.reason)?))
}

/// Register a sanitary certification
pub async fn add_supplier_certification(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<AddCertificationInput>,
) -> AppResult<(StatusCode, Json<CertificationWithStatus>)> {
    let service = SupplierService::new(state.suppliers.clone());
    let certification = service.add_certification(supplier_id, input, today())?;
    Ok((StatusCode::CREATED, Json(certification)))
}

/// Query parameters for listing certifications
#[derive(Debug, Deserialize)]
pub struct ListCertificationsQuery {
    pub current_only: Option<bool>,
}

/// List a supplier's certifications (current only by default)
pub async fn list_supplier_certifications(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    Query(query): Query<ListCertificationsQuery>,
) -> AppResult<Json<Vec<CertificationWithStatus>>> {
    let service = SupplierService::new(state.suppliers.clone());
    let current_only = query.current_only.unwrap_or(true);
    Ok(Json(service.certifications(
        supplier_id,
        current_only,
        today(),
    )?))
}

/// Register an evaluation and return the updated rating
pub async fn add_supplier_evaluation(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<AddEvaluationInput>,
) -> AppResult<(StatusCode, Json<EvaluationOutcome>)> {
    let service = SupplierService::new(state.suppliers.clone());
    let outcome = service.add_evaluation(supplier_id, input)?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Statistics report for one supplier
pub async fn supplier_stats(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<SupplierStats>> {
    let service = SupplierService::new(state.suppliers.clone());
    Ok(Json(service.stats(
        supplier_id,
        state.purchase_history.as_ref(),
        today(),
    )?))
}

/// Active suppliers covering a specialty
pub async fn suppliers_by_specialty(
    State(state): State<AppState>,
    Path(specialty): Path<String>,
) -> AppResult<Json<Vec<SupplierView>>> {
    let service = SupplierService::new(state.suppliers.clone());
    Ok(Json(service.by_specialty(&specialty, today())))
}

/// Query parameters for the certification alert sweep
#[derive(Debug, Deserialize)]
pub struct CertificationAlertQuery {
    pub days_ahead: Option<i64>,
}

/// Certifications of active suppliers approaching expiry
pub async fn certification_alerts(
    State(state): State<AppState>,
    Query(query): Query<CertificationAlertQuery>,
) -> AppResult<Json<Vec<CertificationAlert>>> {
    let service = SupplierService::new(state.suppliers.clone());
    let days_ahead = query
        .days_ahead
        .unwrap_or(state.config.alerts.certification_days_ahead);
    Ok(Json(service.certification_alerts(days_ahead, today())))
}

/// Supplier statistics rollup
pub async fn supplier_overall_stats(
    State(state): State<AppState>,
) -> AppResult<Json<SupplierStatsReport>> {
    let service = SupplierService::new(state.suppliers.clone());
    Ok(Json(service.overall_stats(today())))
}
