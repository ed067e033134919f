//! Dashboard DTOs

use serde::Serialize;

use core_kernel::money::to_f64;
use core_kernel::{CategoryId, YearMonth};
use domain_budget::{CategoryBreakdown, DashboardSummary, MonthlyTotals};

use super::budget::{ExpenseResponse, IncomeResponse, UpcomingFixedExpenseResponse};
use super::investment::GoalResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdownResponse {
    pub category_id: CategoryId,
    pub name: String,
    pub color: String,
    pub total: f64,
    pub percentage: i64,
}

impl From<CategoryBreakdown> for CategoryBreakdownResponse {
    fn from(entry: CategoryBreakdown) -> Self {
        Self {
            category_id: entry.category_id,
            name: entry.name,
            color: entry.color,
            total: to_f64(entry.total),
            percentage: entry.percentage,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MonthlyTotalsResponse {
    /// `YYYY-MM`
    pub month: YearMonth,
    pub income: f64,
    pub expenses: f64,
}

impl From<MonthlyTotals> for MonthlyTotalsResponse {
    fn from(totals: MonthlyTotals) -> Self {
        Self {
            month: totals.month,
            income: to_f64(totals.income),
            expenses: to_f64(totals.expenses),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub reference_month: YearMonth,
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub total_fixed_expenses: f64,
    pub expenses_by_category: Vec<CategoryBreakdownResponse>,
    pub monthly_data: Vec<MonthlyTotalsResponse>,
    pub recent_expenses: Vec<ExpenseResponse>,
    pub recent_incomes: Vec<IncomeResponse>,
    pub upcoming_goals: Vec<GoalResponse>,
    pub upcoming_fixed_expenses: Vec<UpcomingFixedExpenseResponse>,
}

/// Lists shown next to the monthly figures
pub struct DashboardLists {
    pub recent_expenses: Vec<ExpenseResponse>,
    pub recent_incomes: Vec<IncomeResponse>,
    pub upcoming_goals: Vec<GoalResponse>,
    pub upcoming_fixed_expenses: Vec<UpcomingFixedExpenseResponse>,
}

impl DashboardResponse {
    pub fn new(summary: DashboardSummary, lists: DashboardLists) -> Self {
        Self {
            reference_month: summary.reference_month,
            total_income: to_f64(summary.total_income),
            total_expenses: to_f64(summary.total_expenses),
            balance: to_f64(summary.balance),
            total_fixed_expenses: to_f64(summary.total_fixed_expenses),
            expenses_by_category: summary.expenses_by_category.into_iter().map(Into::into).collect(),
            monthly_data: summary.monthly_data.into_iter().map(Into::into).collect(),
            recent_expenses: lists.recent_expenses,
            recent_incomes: lists.recent_incomes,
            upcoming_goals: lists.upcoming_goals,
            upcoming_fixed_expenses: lists.upcoming_fixed_expenses,
        }
    }
}
