//! Investment simulation handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};

use core_kernel::SimulationId;
use domain_investment::{projection_series, ProjectionSummary};

use crate::auth::AuthUser;
use crate::dto::investment::*;
use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::AppState;

/// Lists saved simulations, newest first
pub async fn list_simulations(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<SimulationResponse>>>, ApiError> {
    let simulations = state.investments.list_simulations(user.id).await?;
    Ok(ApiResponse::ok(simulations.into_iter().map(Into::into).collect()))
}

/// Projects and saves a simulation; the final amount is computed server side
pub async fn create_simulation(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<SimulationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SimulationResponse>>), ApiError> {
    let simulation = state
        .investments
        .create_simulation(user.id, request.into_new()?)
        .await?;
    info!(
        user_id = %user.id,
        simulation_id = %simulation.id,
        projected_amount = ?simulation.projected_amount,
        "Simulation saved"
    );
    Ok(ApiResponse::created(simulation.into()))
}

pub async fn delete_simulation(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<SimulationId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.investments.delete_simulation(user.id, id).await?;
    info!(user_id = %user.id, simulation_id = %id, "Simulation deleted");
    Ok(MessageResponse::new("Simulação excluída"))
}

/// Runs the calculator without saving anything
pub async fn preview_simulation(
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<ProjectionRequest>,
) -> Result<Json<ApiResponse<PreviewResponse>>, ApiError> {
    let input = request.input()?;
    let summary = ProjectionSummary::from_input(&input);
    debug!(user_id = %user.id, months = input.period_months, "Simulation previewed");

    Ok(ApiResponse::ok(PreviewResponse {
        summary: summary.into(),
        series: projection_series(&input).map(Into::into).collect(),
    }))
}
