//! Billing cycle allocation
//!
//! Decides which monthly statement each installment of a card purchase lands
//! on, given the card's closing day, and sums the installments billed in a
//! reference month.
//!
//! # Rules
//!
//! - A purchase made on or before the closing day bills its first installment
//!   in the purchase month; a purchase made after it starts one month later.
//! - Installment `i` (zero-based) bills `i` months after the first one.
//! - Every installment is `total_amount / installments` in `f64`. The remainder
//!   of an uneven split is not redistributed, so 100.00 over 3 installments
//!   bills 33.333... three times.
//! - Months are advanced on a month index, so a closing day of 31 never needs
//!   a 31 February to exist.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::YearMonth;
//! use domain_billing::cycle::{allocate_billing_month, InstallmentPlan};
//!
//! let plan = InstallmentPlan::new(300.0, 3, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
//! let april = YearMonth::new(2024, 4).unwrap();
//!
//! assert_eq!(allocate_billing_month(&plan, 10, april).unwrap(), 100.0);
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use core_kernel::YearMonth;

use crate::error::BillingError;

/// The numeric view of one card purchase that the allocator consumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    /// Full purchase amount
    pub total_amount: f64,
    /// Number of monthly installments (at least 1)
    pub installments: u32,
    /// Calendar date of the purchase
    pub purchase_date: NaiveDate,
}

/// One installment and the statement it is billed on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based installment number
    pub number: u32,
    /// Statement month the installment is billed in
    pub billing_month: YearMonth,
    /// Nominal installment amount
    pub amount: f64,
}

impl InstallmentPlan {
    pub fn new(total_amount: f64, installments: u32, purchase_date: NaiveDate) -> Self {
        Self {
            total_amount,
            installments,
            purchase_date,
        }
    }

    /// Equal share of the total billed per installment
    ///
    /// # Errors
    ///
    /// `BillingError::InvalidInstallments` when `installments` is zero.
    pub fn installment_amount(&self) -> Result<f64, BillingError> {
        if self.installments == 0 {
            return Err(BillingError::InvalidInstallments(self.installments));
        }
        Ok(self.total_amount / self.installments as f64)
    }

    /// Statement month of the first installment
    pub fn first_billing_month(&self, closing_day: u32) -> Result<YearMonth, BillingError> {
        check_closing_day(closing_day)?;
        let purchase_month = YearMonth::from_date(self.purchase_date);

        // Strictly after the closing day: the current statement is already closed.
        if self.purchase_date.day() > closing_day {
            Ok(purchase_month.add_months(1))
        } else {
            Ok(purchase_month)
        }
    }
}

fn check_closing_day(closing_day: u32) -> Result<(), BillingError> {
    if !(1..=31).contains(&closing_day) {
        return Err(BillingError::InvalidClosingDay(closing_day));
    }
    Ok(())
}

/// Lists every installment of a purchase with its statement month
///
/// # Arguments
///
/// * `plan` - The purchase being split
/// * `closing_day` - The card's statement closing day (1-31)
///
/// # Returns
///
/// `plan.installments` entries in billing order
pub fn installment_schedule(
    plan: &InstallmentPlan,
    closing_day: u32,
) -> Result<Vec<Installment>, BillingError> {
    let amount = plan.installment_amount()?;
    let first = plan.first_billing_month(closing_day)?;

    Ok((0..plan.installments)
        .map(|i| Installment {
            number: i + 1,
            billing_month: first.add_months(i as i64),
            amount,
        })
        .collect())
}

/// Amount of a purchase billed on the statement for `reference`
///
/// Returns 0.0 when no installment of the purchase lands in that month.
pub fn allocate_billing_month(
    plan: &InstallmentPlan,
    closing_day: u32,
    reference: YearMonth,
) -> Result<f64, BillingError> {
    let amount = plan.installment_amount()?;
    let first = plan.first_billing_month(closing_day)?;

    let index = first.months_until(reference);
    if index >= 0 && index < plan.installments as i64 {
        Ok(amount)
    } else {
        Ok(0.0)
    }
}

/// Sums the installments of several purchases of one card billed in `reference`
pub fn statement_total<'a, I>(
    plans: I,
    closing_day: u32,
    reference: YearMonth,
) -> Result<f64, BillingError>
where
    I: IntoIterator<Item = &'a InstallmentPlan>,
{
    check_closing_day(closing_day)?;
    let mut total = 0.0;
    for plan in plans {
        total += allocate_billing_month(plan, closing_day, reference)?;
    }
    Ok(total)
}

/// Statement total together with limit utilization figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatementSummary {
    pub total: f64,
    /// Share of the limit used, clamped to 0-100
    pub utilization_percent: f64,
    /// Unused limit, never negative
    pub available_credit: f64,
}

impl StatementSummary {
    /// Derives utilization figures for a statement total
    ///
    /// A missing or non-positive limit yields 0% utilization and no available
    /// credit instead of dividing by zero.
    pub fn new(total: f64, limit: Option<f64>) -> Self {
        let (utilization_percent, available_credit) = match limit {
            Some(limit) if limit > 0.0 => (
                (total / limit).min(1.0) * 100.0,
                (limit - total).max(0.0),
            ),
            _ => (0.0, 0.0),
        };

        Self {
            total,
            utilization_percent,
            available_credit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_purchase_on_closing_day_bills_current_month() {
        let plan = InstallmentPlan::new(50.0, 1, date(2024, 5, 10));
        assert_eq!(allocate_billing_month(&plan, 10, ym(2024, 5)).unwrap(), 50.0);
        assert_eq!(allocate_billing_month(&plan, 10, ym(2024, 6)).unwrap(), 0.0);
    }

    #[test]
    fn test_purchase_after_closing_day_bills_next_month() {
        let plan = InstallmentPlan::new(50.0, 1, date(2024, 5, 11));
        assert_eq!(allocate_billing_month(&plan, 10, ym(2024, 5)).unwrap(), 0.0);
        assert_eq!(allocate_billing_month(&plan, 10, ym(2024, 6)).unwrap(), 50.0);
    }

    #[test]
    fn test_schedule_rolls_over_year() {
        let plan = InstallmentPlan::new(300.0, 3, date(2024, 11, 20));
        let schedule = installment_schedule(&plan, 5).unwrap();
        let months: Vec<YearMonth> = schedule.iter().map(|i| i.billing_month).collect();
        assert_eq!(months, vec![ym(2024, 12), ym(2025, 1), ym(2025, 2)]);
    }

    #[test]
    fn test_zero_installments_fails_fast() {
        let plan = InstallmentPlan::new(100.0, 0, date(2024, 1, 1));
        assert_eq!(
            allocate_billing_month(&plan, 10, ym(2024, 1)),
            Err(BillingError::InvalidInstallments(0))
        );
    }

    #[test]
    fn test_summary_without_limit() {
        let summary = StatementSummary::new(120.0, None);
        assert_eq!(summary.utilization_percent, 0.0);
        assert_eq!(summary.available_credit, 0.0);
    }

    #[test]
    fn test_summary_clamps_over_limit() {
        let summary = StatementSummary::new(1500.0, Some(1000.0));
        assert_eq!(summary.utilization_percent, 100.0);
        assert_eq!(summary.available_credit, 0.0);
    }
}
