//! Incomes

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{DateRange, IncomeId, UserId};

use crate::kinds::IncomeType;

/// A recorded income
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub income_type: IncomeType,
    /// Informational only; no future occurrences are generated
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating or replacing an income
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncome {
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub income_type: IncomeType,
    pub is_recurring: bool,
}

/// Income list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomeFilter {
    pub income_type: Option<IncomeType>,
    pub date_range: Option<DateRange>,
    pub limit: Option<u32>,
}

impl IncomeFilter {
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

    pub fn matches(&self, income: &Income) -> bool {
        self.income_type.map_or(true, |t| income.income_type == t)
            && self.date_range.map_or(true, |r| r.contains(income.date))
    }
}
