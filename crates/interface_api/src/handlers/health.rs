//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use core_kernel::{AdapterHealth, HealthCheckResult};

use crate::error::ApiError;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub checks: Vec<HealthCheckResult>,
}

/// Liveness probe
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness probe; checks every storage adapter
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>, ApiError> {
    let mut checks = Vec::with_capacity(state.health_checks.len());
    for adapter in &state.health_checks {
        checks.push(adapter.health_check().await);
    }

    if let Some(failed) = checks.iter().find(|c| matches!(c.status, AdapterHealth::Unhealthy | AdapterHealth::Unknown)) {
        return Err(ApiError::Unavailable(format!(
            "{} indisponível",
            failed.adapter_id
        )));
    }

    Ok(Json(ReadinessResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    }))
}
