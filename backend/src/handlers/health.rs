//! Health check handlers

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Service liveness probe at the root path
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Food Distribution Inventory Platform API".to_string(),
        timestamp: Utc::now(),
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
