//! Dashboard handler

use axum::{extract::State, Json};
use chrono::Datelike;
use tracing::debug;

use domain_budget::dashboard::history_range;
use domain_budget::{upcoming_fixed_expenses, DashboardSummary, ExpenseFilter, IncomeFilter};

use crate::auth::AuthUser;
use crate::dto::budget::{CategoryIndex, ExpenseResponse, UpcomingFixedExpenseResponse};
use crate::dto::dashboard::{DashboardLists, DashboardResponse};
use crate::dto::investment::GoalResponse;
use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

const RECENT_LIMIT: u32 = 5;
const UPCOMING_GOALS: u32 = 3;
const UPCOMING_FIXED: usize = 5;

/// Monthly totals, six-month history and the short lists of the home screen
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    let today = state.timezone.today();
    let reference = state.timezone.current_month();
    let history = history_range(reference);

    let (expenses, incomes, categories, fixed, recent_expenses, recent_incomes, goals) = tokio::try_join!(
        state.budget.list_expenses(user.id, ExpenseFilter::in_range(history)),
        state.budget.list_incomes(user.id, IncomeFilter::in_range(history)),
        state.budget.list_categories(user.id, None),
        state.budget.list_fixed_expenses(user.id),
        state.budget.list_expenses(user.id, ExpenseFilter::recent(RECENT_LIMIT)),
        state.budget.list_incomes(user.id, IncomeFilter::recent(RECENT_LIMIT)),
        state.investments.upcoming_goals(user.id, UPCOMING_GOALS),
    )?;

    let summary = DashboardSummary::build(reference, &expenses, &incomes, &categories, &fixed);
    let upcoming = upcoming_fixed_expenses(&fixed, today.day(), UPCOMING_FIXED)?;
    let index = CategoryIndex::new(&categories);

    debug!(
        user_id = %user.id,
        month = %reference,
        expenses = expenses.len(),
        incomes = incomes.len(),
        "Dashboard built"
    );

    let lists = DashboardLists {
        recent_expenses: recent_expenses
            .into_iter()
            .map(|e| ExpenseResponse::new(e, &index))
            .collect(),
        recent_incomes: recent_incomes.into_iter().map(Into::into).collect(),
        upcoming_goals: goals.into_iter().map(|g| GoalResponse::new(g, today)).collect(),
        upcoming_fixed_expenses: upcoming
            .into_iter()
            .map(|u| UpcomingFixedExpenseResponse::new(u, &index, state.timezone))
            .collect(),
    };

    Ok(ApiResponse::ok(DashboardResponse::new(summary, lists)))
}
