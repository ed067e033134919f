//! Saved investment simulations
//!
//! A simulation stores its inputs together with the amount projected when it
//! was created. The stored figure is a snapshot: nothing recomputes it later.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::money::{from_f64, to_f64};
use core_kernel::{SimulationId, UserId};

use crate::error::InvestmentError;
use crate::projection::{project_investment, InterestType, ProjectionInput};

/// A persisted simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub id: SimulationId,
    pub user_id: UserId,
    pub name: String,
    pub initial_amount: Decimal,
    pub monthly_contribution: Decimal,
    /// Annual rate in percent
    pub interest_rate: Decimal,
    pub interest_type: InterestType,
    pub period_months: u32,
    /// Final amount computed at creation time
    pub projected_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A simulation ready to be stored, with its projection already computed
#[derive(Debug, Clone, PartialEq)]
pub struct NewSimulation {
    pub name: String,
    pub initial_amount: Decimal,
    pub monthly_contribution: Decimal,
    pub interest_rate: Decimal,
    pub interest_type: InterestType,
    pub period_months: u32,
    pub projected_amount: Decimal,
}

impl NewSimulation {
    /// Validates the inputs and computes the projected amount
    ///
    /// # Errors
    ///
    /// `InvalidProjection` for out-of-range inputs, `NonFiniteProjection` when
    /// the result cannot be stored as a decimal.
    pub fn project(
        name: impl Into<String>,
        initial_amount: Decimal,
        monthly_contribution: Decimal,
        interest_rate: Decimal,
        interest_type: InterestType,
        period_months: u32,
    ) -> Result<Self, InvestmentError> {
        let input = ProjectionInput::new(
            to_f64(initial_amount),
            to_f64(monthly_contribution),
            to_f64(interest_rate),
            period_months,
            interest_type,
        )?;

        let projected = project_investment(&input);
        let projected_amount = from_f64(projected)
            .map_err(|_| InvestmentError::NonFiniteProjection(projected.to_string()))?;

        Ok(Self {
            name: name.into(),
            initial_amount,
            monthly_contribution,
            interest_rate,
            interest_type,
            period_months,
            projected_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_project_rounds_to_cents() {
        let sim = NewSimulation::project(
            "Reserva",
            dec!(1000),
            dec!(500),
            dec!(12),
            InterestType::Compound,
            12,
        )
        .unwrap();
        assert_eq!(sim.projected_amount, dec!(7468.08));
    }

    #[test]
    fn test_project_rejects_invalid_period() {
        let result = NewSimulation::project(
            "Longa",
            dec!(1000),
            dec!(0),
            dec!(5),
            InterestType::Simple,
            601,
        );
        assert!(matches!(
            result,
            Err(InvestmentError::InvalidProjection { field: "periodMonths", .. })
        ));
    }

    #[test]
    fn test_extreme_compound_growth_is_not_stored() {
        // 1e9 at 100% a year for 50 years overflows the decimal range.
        let result = NewSimulation::project(
            "Extrema",
            dec!(999999999),
            dec!(999999999),
            dec!(100),
            InterestType::Compound,
            600,
        );
        assert!(matches!(result, Err(InvestmentError::NonFiniteProjection(_))));
    }
}
