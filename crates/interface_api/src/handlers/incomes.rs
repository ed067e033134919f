//! Income handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};

use core_kernel::{DateRange, IncomeId};
use domain_budget::IncomeFilter;

use crate::auth::AuthUser;
use crate::dto::budget::*;
use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::AppState;

pub async fn list_incomes(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<IncomeQuery>,
) -> Result<Json<ApiResponse<Vec<IncomeResponse>>>, ApiError> {
    let date_range = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => Some(DateRange::new(start, end)?),
        _ => None,
    };

    let filter = IncomeFilter {
        income_type: query.income_type,
        date_range,
        limit: None,
    };

    let incomes = state.budget.list_incomes(user.id, filter).await?;
    debug!(user_id = %user.id, count = incomes.len(), "Incomes listed");
    Ok(ApiResponse::ok(incomes.into_iter().map(Into::into).collect()))
}

pub async fn get_income(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<IncomeId>,
) -> Result<Json<ApiResponse<IncomeResponse>>, ApiError> {
    let income = state.budget.get_income(user.id, id).await?;
    Ok(ApiResponse::ok(income.into()))
}

pub async fn create_income(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<IncomeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IncomeResponse>>), ApiError> {
    let income = state.budget.create_income(user.id, request.into_new()?).await?;
    info!(user_id = %user.id, income_id = %income.id, "Income created");
    Ok(ApiResponse::created(income.into()))
}

pub async fn update_income(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<IncomeId>,
    ValidatedJson(request): ValidatedJson<IncomeRequest>,
) -> Result<Json<ApiResponse<IncomeResponse>>, ApiError> {
    let income = state
        .budget
        .update_income(user.id, id, request.into_new()?)
        .await?;
    info!(user_id = %user.id, income_id = %id, "Income updated");
    Ok(ApiResponse::ok(income.into()))
}

pub async fn delete_income(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<IncomeId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.budget.delete_income(user.id, id).await?;
    info!(user_id = %user.id, income_id = %id, "Income deleted");
    Ok(MessageResponse::new("Receita excluída"))
}
