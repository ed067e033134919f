//! Expense handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, info};

use core_kernel::{DateRange, ExpenseId, UserId};
use domain_budget::{Expense, ExpenseFilter};

use crate::auth::AuthUser;
use crate::dto::budget::*;
use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::AppState;

/// Attaches each expense's category
pub(crate) async fn with_categories(
    state: &AppState,
    user_id: UserId,
    expenses: Vec<Expense>,
) -> Result<Vec<ExpenseResponse>, ApiError> {
    let categories = CategoryIndex::new(&state.budget.list_categories(user_id, None).await?);
    Ok(expenses
        .into_iter()
        .map(|e| ExpenseResponse::new(e, &categories))
        .collect())
}

async fn respond_one(state: &AppState, user_id: UserId, expense: Expense) -> Result<ExpenseResponse, ApiError> {
    let mut responses = with_categories(state, user_id, vec![expense]).await?;
    responses
        .pop()
        .ok_or_else(|| ApiError::Internal("expense vanished while rendering".to_string()))
}

/// Lists expenses, newest first
///
/// The date filter applies only when both bounds are given.
pub async fn list_expenses(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<ExpenseQuery>,
) -> Result<Json<ApiResponse<Vec<ExpenseResponse>>>, ApiError> {
    let date_range = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => Some(DateRange::new(start, end)?),
        _ => None,
    };

    let filter = ExpenseFilter {
        category_id: query.category_id,
        expense_type: query.expense_type,
        date_range,
        limit: None,
    };

    let expenses = state.budget.list_expenses(user.id, filter).await?;
    debug!(user_id = %user.id, count = expenses.len(), "Expenses listed");
    Ok(ApiResponse::ok(with_categories(&state, user.id, expenses).await?))
}

pub async fn get_expense(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ExpenseId>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, ApiError> {
    let expense = state.budget.get_expense(user.id, id).await?;
    Ok(ApiResponse::ok(respond_one(&state, user.id, expense).await?))
}

pub async fn create_expense(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<ExpenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseResponse>>), ApiError> {
    let new_expense = request.into_new()?;
    if let Some(category_id) = new_expense.category_id {
        state.budget.get_category(user.id, category_id).await?;
    }

    let expense = state.budget.create_expense(user.id, new_expense).await?;
    info!(user_id = %user.id, expense_id = %expense.id, "Expense created");
    Ok(ApiResponse::created(respond_one(&state, user.id, expense).await?))
}

pub async fn update_expense(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ExpenseId>,
    ValidatedJson(request): ValidatedJson<ExpenseRequest>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, ApiError> {
    let new_expense = request.into_new()?;
    if let Some(category_id) = new_expense.category_id {
        state.budget.get_category(user.id, category_id).await?;
    }

    let expense = state.budget.update_expense(user.id, id, new_expense).await?;
    info!(user_id = %user.id, expense_id = %id, "Expense updated");
    Ok(ApiResponse::ok(respond_one(&state, user.id, expense).await?))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ExpenseId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.budget.delete_expense(user.id, id).await?;
    info!(user_id = %user.id, expense_id = %id, "Expense deleted");
    Ok(MessageResponse::new("Despesa excluída"))
}
