//! Savings goal handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};

use core_kernel::GoalId;

use crate::auth::AuthUser;
use crate::dto::investment::*;
use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::AppState;

/// Lists goals, open ones first, then by priority and deadline
pub async fn list_goals(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<GoalResponse>>>, ApiError> {
    let goals = state.investments.list_goals(user.id).await?;
    let today = state.timezone.today();
    debug!(user_id = %user.id, count = goals.len(), "Goals listed");
    Ok(ApiResponse::ok(
        goals.into_iter().map(|g| GoalResponse::new(g, today)).collect(),
    ))
}

pub async fn get_goal(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<GoalId>,
) -> Result<Json<ApiResponse<GoalResponse>>, ApiError> {
    let goal = state.investments.get_goal(user.id, id).await?;
    Ok(ApiResponse::ok(GoalResponse::new(goal, state.timezone.today())))
}

pub async fn create_goal(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<GoalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GoalResponse>>), ApiError> {
    let goal = state.investments.create_goal(user.id, request.into_new()?).await?;
    info!(user_id = %user.id, goal_id = %goal.id, completed = goal.is_completed, "Goal created");
    Ok(ApiResponse::created(GoalResponse::new(goal, state.timezone.today())))
}

/// Replaces a goal; completion is re-derived from the amounts
pub async fn update_goal(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<GoalId>,
    ValidatedJson(request): ValidatedJson<GoalRequest>,
) -> Result<Json<ApiResponse<GoalResponse>>, ApiError> {
    let goal = state
        .investments
        .update_goal(user.id, id, request.into_new()?)
        .await?;
    info!(user_id = %user.id, goal_id = %id, completed = goal.is_completed, "Goal updated");
    Ok(ApiResponse::ok(GoalResponse::new(goal, state.timezone.today())))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<GoalId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.investments.delete_goal(user.id, id).await?;
    info!(user_id = %user.id, goal_id = %id, "Goal deleted");
    Ok(MessageResponse::new("Meta excluída"))
}
