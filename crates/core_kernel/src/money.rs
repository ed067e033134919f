//! Money amounts and their bridge to the calculators
//!
//! Stored amounts (expenses, limits, goals) are `rust_decimal::Decimal` with two
//! decimal places. The projection and billing calculators work in `f64`; the
//! conversion helpers at the bottom of this module are the only bridge between
//! the two representations.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use thiserror::Error;

/// Largest amount accepted on any write path
pub const MAX_AMOUNT: Decimal = dec!(999999999);

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount is not representable as a decimal: {0}")]
    NotRepresentable(String),
}

/// Converts a stored amount into the `f64` domain of the calculators
pub fn to_f64(amount: Decimal) -> f64 {
    // Every Decimal is within f64 range; only precision is lost.
    amount.to_f64().unwrap_or_default()
}

/// Converts a calculator result back into a storable two-place amount
///
/// Fails for NaN, infinities and values beyond the Decimal range instead of
/// storing a corrupted number.
pub fn from_f64(value: f64) -> Result<Decimal, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::NotRepresentable(value.to_string()));
    }
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| MoneyError::NotRepresentable(value.to_string()))
}

/// Whole-number share of `value` in `total`, rounded half up
///
/// Returns 0 when the total is zero.
pub fn percentage(value: Decimal, total: Decimal) -> i64 {
    if total.is_zero() {
        return 0;
    }
    (value / total * dec!(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cents_survive_the_float_bridge(cents in 0i64..99_999_999_900i64) {
            let amount = Decimal::new(cents, 2);
            prop_assert_eq!(from_f64(to_f64(amount)).unwrap(), amount);
        }

        #[test]
        fn percentage_of_part_never_exceeds_hundred(
            part in 0i64..1_000_000i64,
            extra in 0i64..1_000_000i64,
        ) {
            let share = percentage(Decimal::new(part, 2), Decimal::new(part + extra + 1, 2));
            prop_assert!((0..=100).contains(&share));
        }
    }
}
