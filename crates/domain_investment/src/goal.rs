//! Investment goals
//!
//! A goal tracks saved progress towards a target amount by a deadline.
//! `is_completed` is derived from the amounts on every write.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use core_kernel::money::{percentage, MAX_AMOUNT};
use core_kernel::{GoalId, UserId};

use crate::error::InvestmentError;

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    /// 1 (lowest) to 5 (highest)
    pub priority: u8,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Whole-number progress towards the target; may exceed 100
    pub fn progress_percent(&self) -> i64 {
        percentage(self.current_amount, self.target_amount)
    }

    /// Days from `today` to the deadline, negative once overdue
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    /// Amount still missing, never negative
    pub fn remaining_amount(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }
}

/// List order: open goals first, then higher priority, then nearer deadline
pub fn goal_ordering(a: &Goal, b: &Goal) -> Ordering {
    a.is_completed
        .cmp(&b.is_completed)
        .then_with(|| b.priority.cmp(&a.priority))
        .then_with(|| a.deadline.cmp(&b.deadline))
}

/// Fields supplied when creating or replacing a goal
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub priority: u8,
}

impl NewGoal {
    /// Checks amounts and priority
    pub fn validate(&self) -> Result<(), InvestmentError> {
        if self.target_amount <= Decimal::ZERO {
            return Err(InvestmentError::invalid_goal(
                "targetAmount",
                "Valor alvo deve ser positivo",
            ));
        }
        if self.current_amount < Decimal::ZERO {
            return Err(InvestmentError::invalid_goal(
                "currentAmount",
                "Valor atual não pode ser negativo",
            ));
        }
        if self.target_amount > MAX_AMOUNT || self.current_amount > MAX_AMOUNT {
            return Err(InvestmentError::invalid_goal("targetAmount", "Valor muito alto"));
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&self.priority) {
            return Err(InvestmentError::invalid_goal(
                "priority",
                "Prioridade deve ser entre 1 e 5",
            ));
        }
        Ok(())
    }

    /// Completion flag stored alongside the goal
    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_goal(target: Decimal, current: Decimal, priority: u8) -> NewGoal {
        NewGoal {
            name: "Viagem".to_string(),
            description: None,
            target_amount: target,
            current_amount: current,
            deadline: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            priority,
        }
    }

    #[test]
    fn test_completion_flag() {
        assert!(new_goal(dec!(100), dec!(100), 1).is_completed());
        assert!(!new_goal(dec!(100), dec!(99.99), 1).is_completed());
    }

    #[test]
    fn test_validate_priority_bounds() {
        assert!(new_goal(dec!(100), dec!(0), 0).validate().is_err());
        assert!(new_goal(dec!(100), dec!(0), 6).validate().is_err());
        assert!(new_goal(dec!(100), dec!(0), 5).validate().is_ok());
    }

    #[test]
    fn test_validate_amounts() {
        assert!(new_goal(dec!(0), dec!(0), 1).validate().is_err());
        assert!(new_goal(dec!(10), dec!(-1), 1).validate().is_err());
    }
}
