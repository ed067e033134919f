//! Property-Based Test Generators
//!
//! Proptest strategies producing values that satisfy the domain's input rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_billing::MAX_INSTALLMENTS;
use domain_investment::{InterestType, ProjectionInput};

/// Positive amounts with cent precision, up to 999 999 999.00
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=99_999_999_900i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Small everyday amounts, 0.01 to 10 000.00
pub fn everyday_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Dates between 2000 and 2099; day capped at 28 so every month is valid
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN))
}

/// Any day a statement may close or a bill may fall due
pub fn day_of_month_strategy() -> impl Strategy<Value = u32> {
    1u32..=31
}

pub fn installments_strategy() -> impl Strategy<Value = u32> {
    1u32..=MAX_INSTALLMENTS
}

pub fn interest_type_strategy() -> impl Strategy<Value = InterestType> {
    prop_oneof![Just(InterestType::Simple), Just(InterestType::Compound)]
}

/// Valid projection inputs over the full accepted range
pub fn projection_input_strategy() -> impl Strategy<Value = ProjectionInput> {
    (
        0.0f64..=999_999_999.0,
        0.0f64..=999_999_999.0,
        0.0f64..=100.0,
        1u32..=600,
        interest_type_strategy(),
    )
        .prop_filter_map("inputs within range", |(p, c, rate, months, kind)| {
            ProjectionInput::new(p, c, rate, months, kind).ok()
        })
}

/// Passwords meeting every strength rule
pub fn strong_password_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{4,20}[0-9]{1,4}"
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn amounts_stay_in_range(amount in amount_strategy()) {
            prop_assert!(amount > Decimal::ZERO);
            prop_assert!(amount <= core_kernel::money::MAX_AMOUNT);
            prop_assert!(amount.scale() == 2);
        }

        #[test]
        fn generated_passwords_are_strong(password in strong_password_strategy()) {
            prop_assert!(domain_identity::validate_password_strength(&password).is_ok());
        }
    }
}
