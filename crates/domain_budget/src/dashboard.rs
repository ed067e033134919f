//! Dashboard aggregation
//!
//! Pure functions over records already fetched for the trailing months. The
//! caller loads expenses and incomes for [`history_range`] once and everything
//! else is derived in memory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::money::percentage;
use core_kernel::{CategoryId, DateRange, YearMonth};

use crate::category::{Category, UNCATEGORIZED_COLOR, UNCATEGORIZED_NAME};
use crate::expense::Expense;
use crate::fixed_expense::FixedExpense;
use crate::income::Income;

/// Months shown in the income/expense history, including the current one
pub const HISTORY_MONTHS: u32 = 6;

/// Expenses of one category in the reference month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category_id: CategoryId,
    pub name: String,
    pub color: String,
    pub total: Decimal,
    /// Share of all expenses in the month, rounded to a whole percent
    pub percentage: i64,
}

/// Income and expense totals of one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub month: YearMonth,
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Headline figures for the reference month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub reference_month: YearMonth,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    /// Sum of all active fixed expenses
    pub total_fixed_expenses: Decimal,
    pub expenses_by_category: Vec<CategoryBreakdown>,
    /// Oldest month first
    pub monthly_data: Vec<MonthlyTotals>,
}

/// Dates covered by the history chart ending with `reference`
pub fn history_range(reference: YearMonth) -> DateRange {
    DateRange {
        start: reference.add_months(-(HISTORY_MONTHS as i64 - 1)).first_day(),
        end: reference.last_day(),
    }
}

/// Groups the month's categorized expenses, largest total first
///
/// Expenses without a category count towards `total_expenses` but get no
/// entry. A category id that no longer resolves is labelled "Sem categoria".
pub fn category_breakdown(
    expenses: &[&Expense],
    categories: &[Category],
    total_expenses: Decimal,
) -> Vec<CategoryBreakdown> {
    let mut totals: HashMap<CategoryId, Decimal> = HashMap::new();
    for expense in expenses {
        if let Some(category_id) = expense.category_id {
            *totals.entry(category_id).or_insert(Decimal::ZERO) += expense.amount;
        }
    }

    let mut breakdown: Vec<CategoryBreakdown> = totals
        .into_iter()
        .map(|(category_id, total)| {
            let category = categories.iter().find(|c| c.id == category_id);
            CategoryBreakdown {
                category_id,
                name: category.map_or(UNCATEGORIZED_NAME.to_string(), |c| c.name.clone()),
                color: category.map_or(UNCATEGORIZED_COLOR.to_string(), |c| c.color.clone()),
                total,
                percentage: percentage(total, total_expenses),
            }
        })
        .collect();

    breakdown.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    breakdown
}

/// Income and expense totals for each of `months`
pub fn monthly_totals(months: &[YearMonth], expenses: &[Expense], incomes: &[Income]) -> Vec<MonthlyTotals> {
    months
        .iter()
        .map(|month| MonthlyTotals {
            month: *month,
            income: incomes
                .iter()
                .filter(|i| month.contains(i.date))
                .map(|i| i.amount)
                .sum(),
            expenses: expenses
                .iter()
                .filter(|e| month.contains(e.date))
                .map(|e| e.amount)
                .sum(),
        })
        .collect()
}

impl DashboardSummary {
    /// Builds the summary for `reference`
    ///
    /// # Arguments
    ///
    /// * `reference` - The current month
    /// * `expenses` - Expenses within [`history_range`] of `reference`
    /// * `incomes` - Incomes within [`history_range`] of `reference`
    /// * `categories` - The user's categories
    /// * `fixed_expenses` - The user's fixed expenses, active or not
    pub fn build(
        reference: YearMonth,
        expenses: &[Expense],
        incomes: &[Income],
        categories: &[Category],
        fixed_expenses: &[FixedExpense],
    ) -> Self {
        let month_expenses: Vec<&Expense> =
            expenses.iter().filter(|e| reference.contains(e.date)).collect();

        let total_expenses: Decimal = month_expenses.iter().map(|e| e.amount).sum();
        let total_income: Decimal = incomes
            .iter()
            .filter(|i| reference.contains(i.date))
            .map(|i| i.amount)
            .sum();
        let total_fixed_expenses = fixed_expenses
            .iter()
            .filter(|f| f.is_active)
            .map(|f| f.amount)
            .sum();

        Self {
            reference_month: reference,
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            total_fixed_expenses,
            expenses_by_category: category_breakdown(&month_expenses, categories, total_expenses),
            monthly_data: monthly_totals(&reference.trailing(HISTORY_MONTHS), expenses, incomes),
        }
    }
}
