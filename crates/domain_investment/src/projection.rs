//! Investment growth projection
//!
//! Computes the future value of an initial principal plus a fixed monthly
//! contribution under simple or compound interest, and the month-by-month
//! series the simulator charts.
//!
//! # Methods
//!
//! With `r = annual_rate_percent / 100 / 12` and `n` months:
//!
//! - **Compound**: `P·(1+r)^n + C·((1+r)^n − 1)/r`, the contributions forming an
//!   ordinary annuity. At `r = 0` this is `P + C·n`.
//! - **Simple**: `P + C·n + P·r·n + C·n·r·((n+1)/2)/n`. The last term is
//!   evaluated exactly as written, including the `n/n` that cancels, so results
//!   match the historical figures to the last bit.
//!
//! All arithmetic is `f64`. Inputs are range-checked once by
//! [`ProjectionInput::new`]; the calculators themselves never fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InvestmentError;

/// Longest projection accepted (50 years)
pub const MAX_PERIOD_MONTHS: u32 = 600;

/// Largest amount accepted for the principal or the monthly contribution
pub const MAX_PROJECTION_AMOUNT: f64 = 999_999_999.0;

/// Highest annual rate accepted, in percent
pub const MAX_ANNUAL_RATE_PERCENT: f64 = 100.0;

/// How interest accrues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InterestType {
    Simple,
    Compound,
}

impl InterestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestType::Simple => "SIMPLE",
            InterestType::Compound => "COMPOUND",
        }
    }
}

impl fmt::Display for InterestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SIMPLE" => Ok(InterestType::Simple),
            "COMPOUND" => Ok(InterestType::Compound),
            other => Err(format!("Unknown interest type: {}", other)),
        }
    }
}

/// Validated inputs of a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    /// Annual rate in percent (12.0 means 12% a year)
    pub annual_rate_percent: f64,
    pub period_months: u32,
    pub interest_type: InterestType,
}

impl ProjectionInput {
    /// Validates and builds a projection input
    ///
    /// # Errors
    ///
    /// `InvestmentError::InvalidProjection` naming the first offending field
    /// when an amount is negative or above 999 999 999, the rate is outside
    /// 0-100, the period is outside 1-600 months, or any number is not finite.
    pub fn new(
        initial_amount: f64,
        monthly_contribution: f64,
        annual_rate_percent: f64,
        period_months: u32,
        interest_type: InterestType,
    ) -> Result<Self, InvestmentError> {
        check_amount("initialAmount", initial_amount, "Valor inicial não pode ser negativo")?;
        check_amount(
            "monthlyContribution",
            monthly_contribution,
            "Aporte mensal não pode ser negativo",
        )?;

        if !annual_rate_percent.is_finite() {
            return Err(InvestmentError::invalid("interestRate", "Taxa deve ser um número"));
        }
        if annual_rate_percent < 0.0 {
            return Err(InvestmentError::invalid("interestRate", "Taxa não pode ser negativa"));
        }
        if annual_rate_percent > MAX_ANNUAL_RATE_PERCENT {
            return Err(InvestmentError::invalid("interestRate", "Taxa deve ser no máximo 100%"));
        }

        if period_months < 1 {
            return Err(InvestmentError::invalid(
                "periodMonths",
                "Período deve ser de pelo menos 1 mês",
            ));
        }
        if period_months > MAX_PERIOD_MONTHS {
            return Err(InvestmentError::invalid("periodMonths", "Período máximo de 50 anos"));
        }

        Ok(Self {
            initial_amount,
            monthly_contribution,
            annual_rate_percent,
            period_months,
            interest_type,
        })
    }

    /// Monthly rate as a fraction
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    /// Principal plus contributions made up to `months`, without interest
    pub fn total_invested(&self, months: u32) -> f64 {
        self.initial_amount + self.monthly_contribution * months as f64
    }
}

fn check_amount(field: &'static str, value: f64, negative_message: &str) -> Result<(), InvestmentError> {
    if !value.is_finite() {
        return Err(InvestmentError::invalid(field, "Valor deve ser um número"));
    }
    if value < 0.0 {
        return Err(InvestmentError::invalid(field, negative_message));
    }
    if value > MAX_PROJECTION_AMOUNT {
        return Err(InvestmentError::invalid(field, "Valor muito alto"));
    }
    Ok(())
}

/// Compound-interest future value with end-of-month contributions
///
/// # Arguments
///
/// * `principal` - Amount invested at month 0
/// * `contribution` - Amount added at the end of every month
/// * `monthly_rate` - Rate per month as a fraction
/// * `months` - Number of months elapsed
pub fn compound_future_value(principal: f64, contribution: f64, monthly_rate: f64, months: u32) -> f64 {
    // The annuity factor is 0/0 at a zero rate; its limit is `months`.
    if monthly_rate == 0.0 {
        return principal + contribution * months as f64;
    }

    let growth = (1.0 + monthly_rate).powf(months as f64);
    let future_principal = principal * growth;
    let future_contributions = contribution * ((growth - 1.0) / monthly_rate);

    future_principal + future_contributions
}

/// Simple-interest future value, averaging the contribution holding period
///
/// Arguments as for [`compound_future_value`].
pub fn simple_future_value(principal: f64, contribution: f64, monthly_rate: f64, months: u32) -> f64 {
    // Nothing has accrued yet, and the contribution term divides by `months`.
    if months == 0 {
        return principal;
    }

    let n = months as f64;
    let total_invested = principal + contribution * n;
    let interest_on_principal = principal * monthly_rate * n;
    let average_months = (n + 1.0) / 2.0;
    let interest_on_contributions = contribution * n * monthly_rate * average_months / n;

    total_invested + interest_on_principal + interest_on_contributions
}

/// Value of the investment after `months`, using the input's method
pub fn future_value(input: &ProjectionInput, months: u32) -> f64 {
    let rate = input.monthly_rate();
    match input.interest_type {
        InterestType::Compound => {
            compound_future_value(input.initial_amount, input.monthly_contribution, rate, months)
        }
        InterestType::Simple => {
            simple_future_value(input.initial_amount, input.monthly_contribution, rate, months)
        }
    }
}

/// Value of the investment at the end of the input's period
pub fn project_investment(input: &ProjectionInput) -> f64 {
    debug_assert!(input.period_months >= 1, "projection period must be at least one month");
    future_value(input, input.period_months)
}

/// One month of a projection series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub month: u32,
    pub total_invested: f64,
    pub total_with_interest: f64,
    pub interest: f64,
}

/// Month-by-month projection from month 0 to the end of the period
///
/// Each point is computed on demand. Cloning the series, or calling
/// [`projection_series`] again, restarts it from month 0.
#[derive(Debug, Clone)]
pub struct ProjectionSeries {
    input: ProjectionInput,
    next_month: u32,
}

impl ProjectionSeries {
    fn point(&self, month: u32) -> ProjectionPoint {
        let total_with_interest = future_value(&self.input, month);
        let total_invested = self.input.total_invested(month);
        ProjectionPoint {
            month,
            total_invested,
            total_with_interest,
            interest: total_with_interest - total_invested,
        }
    }
}

impl Iterator for ProjectionSeries {
    type Item = ProjectionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_month > self.input.period_months {
            return None;
        }
        let point = self.point(self.next_month);
        self.next_month += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.input.period_months + 1).saturating_sub(self.next_month) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProjectionSeries {}

/// Series of `period_months + 1` points, months `0..=period_months`
pub fn projection_series(input: &ProjectionInput) -> ProjectionSeries {
    ProjectionSeries {
        input: *input,
        next_month: 0,
    }
}

/// Headline figures of a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub final_amount: f64,
    pub total_invested: f64,
    pub total_interest: f64,
}

impl ProjectionSummary {
    /// Figures at the last month of the period
    pub fn from_input(input: &ProjectionInput) -> Self {
        let final_amount = project_investment(input);
        let total_invested = input.total_invested(input.period_months);
        Self {
            final_amount,
            total_invested,
            total_interest: final_amount - total_invested,
        }
    }
}
