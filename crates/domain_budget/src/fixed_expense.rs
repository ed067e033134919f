//! Recurring fixed expenses and due-date alerts
//!
//! Due dates use a 30-day month approximation: a bill due on the 5th, seen on
//! the 28th, is `30 - 28 + 5 = 7` days away regardless of the actual month
//! length.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CategoryId, FixedExpenseId, Timezone, UserId, YearMonth};

use crate::error::BudgetError;
use crate::kinds::Frequency;

/// Days in the approximated month used for wrap-around
const APPROX_MONTH_DAYS: u32 = 30;

/// A recurring bill such as rent or a subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: FixedExpenseId,
    pub user_id: UserId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    /// Day of month the bill is due (1-31)
    pub due_day: u32,
    pub frequency: Frequency,
    pub is_active: bool,
    /// When the bill was last marked as paid
    pub last_paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating or replacing a fixed expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFixedExpense {
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub due_day: u32,
    pub frequency: Frequency,
    pub category_id: Option<CategoryId>,
    pub is_active: bool,
}

/// How close a bill is to its due day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Urgency {
    /// Due within 3 days
    Critical,
    /// Due within a week
    Warning,
    Ok,
}

impl Urgency {
    pub fn from_days(days_until_due: u32) -> Self {
        match days_until_due {
            0..=3 => Urgency::Critical,
            4..=7 => Urgency::Warning,
            _ => Urgency::Ok,
        }
    }
}

/// Days from `today_day` to the next `due_day`
///
/// # Errors
///
/// `BudgetError::InvalidDay` when either day is outside 1-31.
pub fn days_until_due(due_day: u32, today_day: u32) -> Result<u32, BudgetError> {
    for day in [due_day, today_day] {
        if !(1..=31).contains(&day) {
            return Err(BudgetError::InvalidDay(day));
        }
    }

    if due_day >= today_day {
        Ok(due_day - today_day)
    } else {
        // due_day >= 1 and today_day <= 31, so this never goes below zero.
        Ok(APPROX_MONTH_DAYS + due_day - today_day)
    }
}

impl FixedExpense {
    pub fn days_until_due(&self, today_day: u32) -> Result<u32, BudgetError> {
        days_until_due(self.due_day, today_day)
    }

    pub fn urgency(&self, today_day: u32) -> Result<Urgency, BudgetError> {
        Ok(Urgency::from_days(self.days_until_due(today_day)?))
    }

    /// Returns true if the bill was marked paid during `month`, as seen in `timezone`
    pub fn is_paid_in(&self, month: YearMonth, timezone: Timezone) -> bool {
        self.last_paid_at
            .map_or(false, |paid| month.contains(paid.with_timezone(&timezone.0).date_naive()))
    }
}

/// A fixed expense annotated for the due-date alert list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingFixedExpense {
    pub expense: FixedExpense,
    pub days_until_due: u32,
    pub urgency: Urgency,
}

/// Active fixed expenses ordered by days until due, at most `limit`
pub fn upcoming_fixed_expenses(
    expenses: &[FixedExpense],
    today_day: u32,
    limit: usize,
) -> Result<Vec<UpcomingFixedExpense>, BudgetError> {
    let mut upcoming = expenses
        .iter()
        .filter(|e| e.is_active)
        .map(|e| {
            let days = e.days_until_due(today_day)?;
            Ok(UpcomingFixedExpense {
                expense: e.clone(),
                days_until_due: days,
                urgency: Urgency::from_days(days),
            })
        })
        .collect::<Result<Vec<_>, BudgetError>>()?;

    // Stable sort keeps the due-day order of ties.
    upcoming.sort_by_key(|u| u.days_until_due);
    upcoming.truncate(limit);
    Ok(upcoming)
}
