//! One-off expenses

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CategoryId, DateRange, ExpenseId, UserId};

use crate::kinds::ExpenseType;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub expense_type: ExpenseType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating or replacing an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub expense_type: ExpenseType,
    pub category_id: Option<CategoryId>,
}

/// Expense list filter; every set field must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub category_id: Option<CategoryId>,
    pub expense_type: Option<ExpenseType>,
    /// Inclusive date bounds
    pub date_range: Option<DateRange>,
    /// Keep only the most recent `limit` rows
    pub limit: Option<u32>,
}

impl ExpenseFilter {
    pub fn in_range(range: DateRange) -> Self {
        Self {
            date_range: Some(range),
            ..Default::default()
        }
    }

    pub fn recent(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// Returns true if `expense` passes every set criterion (ignores `limit`)
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category_id.map_or(true, |id| expense.category_id == Some(id))
            && self.expense_type.map_or(true, |t| expense.expense_type == t)
            && self.date_range.map_or(true, |r| r.contains(expense.date))
    }
}
