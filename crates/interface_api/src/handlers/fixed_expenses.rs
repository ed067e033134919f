//! Fixed (recurring) expense handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};

use core_kernel::{FixedExpenseId, UserId};
use domain_budget::{FixedExpense, NewFixedExpense};

use crate::auth::AuthUser;
use crate::dto::budget::*;
use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::AppState;

async fn category_index(state: &AppState, user_id: UserId) -> Result<CategoryIndex, ApiError> {
    Ok(CategoryIndex::new(&state.budget.list_categories(user_id, None).await?))
}

async fn check_category(state: &AppState, user_id: UserId, expense: &NewFixedExpense) -> Result<(), ApiError> {
    if let Some(category_id) = expense.category_id {
        state.budget.get_category(user_id, category_id).await?;
    }
    Ok(())
}

async fn respond(state: &AppState, user_id: UserId, expense: FixedExpense) -> Result<FixedExpenseResponse, ApiError> {
    let categories = category_index(state, user_id).await?;
    Ok(FixedExpenseResponse::new(expense, &categories, state.timezone))
}

/// Lists fixed expenses by due day
pub async fn list_fixed_expenses(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<FixedExpenseResponse>>>, ApiError> {
    let expenses = state.budget.list_fixed_expenses(user.id).await?;
    let categories = category_index(&state, user.id).await?;
    debug!(user_id = %user.id, count = expenses.len(), "Fixed expenses listed");

    Ok(ApiResponse::ok(
        expenses
            .into_iter()
            .map(|e| FixedExpenseResponse::new(e, &categories, state.timezone))
            .collect(),
    ))
}

pub async fn get_fixed_expense(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<FixedExpenseId>,
) -> Result<Json<ApiResponse<FixedExpenseResponse>>, ApiError> {
    let expense = state.budget.get_fixed_expense(user.id, id).await?;
    Ok(ApiResponse::ok(respond(&state, user.id, expense).await?))
}

pub async fn create_fixed_expense(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<FixedExpenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FixedExpenseResponse>>), ApiError> {
    let new_expense = request.into_new()?;
    check_category(&state, user.id, &new_expense).await?;

    let expense = state.budget.create_fixed_expense(user.id, new_expense).await?;
    info!(user_id = %user.id, fixed_expense_id = %expense.id, "Fixed expense created");
    Ok(ApiResponse::created(respond(&state, user.id, expense).await?))
}

pub async fn update_fixed_expense(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<FixedExpenseId>,
    ValidatedJson(request): ValidatedJson<FixedExpenseRequest>,
) -> Result<Json<ApiResponse<FixedExpenseResponse>>, ApiError> {
    let new_expense = request.into_new()?;
    check_category(&state, user.id, &new_expense).await?;

    let expense = state
        .budget
        .update_fixed_expense(user.id, id, new_expense)
        .await?;
    info!(user_id = %user.id, fixed_expense_id = %id, "Fixed expense updated");
    Ok(ApiResponse::ok(respond(&state, user.id, expense).await?))
}

/// Records (or clears) the payment of a fixed expense
pub async fn mark_fixed_expense_paid(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<FixedExpenseId>,
    ValidatedJson(request): ValidatedJson<MarkPaidRequest>,
) -> Result<Json<ApiResponse<FixedExpenseResponse>>, ApiError> {
    let expense = state
        .budget
        .mark_fixed_expense_paid(user.id, id, request.mark_as_paid)
        .await?;
    info!(user_id = %user.id, fixed_expense_id = %id, paid = request.mark_as_paid, "Fixed expense payment recorded");
    Ok(ApiResponse::ok(respond(&state, user.id, expense).await?))
}

pub async fn delete_fixed_expense(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<FixedExpenseId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.budget.delete_fixed_expense(user.id, id).await?;
    info!(user_id = %user.id, fixed_expense_id = %id, "Fixed expense deleted");
    Ok(MessageResponse::new("Gasto fixo excluído"))
}
