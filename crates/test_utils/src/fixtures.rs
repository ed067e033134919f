//! Pre-built Test Fixtures
//!
//! Ready-made inputs for the domain ports. Names and emails come from `fake`
//! so tests sharing a store do not collide; amounts and dates are fixed so
//! expected figures stay predictable.

use chrono::NaiveDate;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{CategoryId, YearMonth};
use domain_billing::{CardBrand, NewCardPurchase, NewCreditCard, DEFAULT_CARD_COLOR};
use domain_budget::{ExpenseType, Frequency, NewExpense, NewFixedExpense};
use domain_investment::{InterestType, NewGoal};

/// Calendar values shared across tests
pub struct DateFixtures;

impl DateFixtures {
    /// Builds a date, panicking on an impossible one
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }

    /// May 2024, the month most fixtures fall in
    pub fn reference_month() -> YearMonth {
        YearMonth::new(2024, 5).expect("valid fixture month")
    }

    /// 15 May 2024
    pub fn mid_reference_month() -> NaiveDate {
        Self::date(2024, 5, 15)
    }
}

/// Account fixtures
pub struct UserFixtures;

impl UserFixtures {
    pub fn name() -> String {
        Name().fake()
    }

    /// A random lower-case email
    pub fn email() -> String {
        let email: String = SafeEmail().fake();
        email.to_lowercase()
    }

    /// Satisfies every password rule
    pub fn strong_password() -> &'static str {
        "Segredo123"
    }
}

/// Budget inputs
pub struct BudgetFixtures;

impl BudgetFixtures {
    pub fn expense(name: &str, amount: Decimal, date: NaiveDate) -> NewExpense {
        NewExpense {
            name: name.to_string(),
            description: None,
            amount,
            date,
            expense_type: ExpenseType::Variable,
            category_id: None,
        }
    }

    pub fn categorized_expense(amount: Decimal, date: NaiveDate, category_id: CategoryId) -> NewExpense {
        NewExpense {
            category_id: Some(category_id),
            ..Self::expense("Mercado", amount, date)
        }
    }

    pub fn fixed_expense(name: &str, amount: Decimal, due_day: u32) -> NewFixedExpense {
        NewFixedExpense {
            name: name.to_string(),
            description: None,
            amount,
            due_day,
            frequency: Frequency::Monthly,
            category_id: None,
            is_active: true,
        }
    }

    /// Rent of 1 500.00 due on the 10th
    pub fn rent() -> NewFixedExpense {
        Self::fixed_expense("Aluguel", dec!(1500.00), 10)
    }
}

/// Credit card inputs
pub struct CardFixtures;

impl CardFixtures {
    /// A 1 000.00 limit Mastercard closing on `closing_day`, due on the 17th
    pub fn card(closing_day: u32) -> NewCreditCard {
        NewCreditCard {
            name: "Nubank".to_string(),
            last_digits: Some("1234".to_string()),
            brand: CardBrand::Mastercard,
            limit: dec!(1000.00),
            closing_day,
            due_day: 17,
            color: DEFAULT_CARD_COLOR.to_string(),
            is_active: true,
        }
    }

    pub fn purchase(name: &str, total: Decimal, installments: u32, date: NaiveDate) -> NewCardPurchase {
        NewCardPurchase {
            name: name.to_string(),
            description: None,
            total_amount: total,
            installments,
            purchase_date: date,
            category_id: None,
        }
    }
}

/// Goal and simulation inputs
pub struct InvestmentFixtures;

impl InvestmentFixtures {
    pub fn goal(name: &str, target: Decimal, current: Decimal, deadline: NaiveDate, priority: u8) -> NewGoal {
        NewGoal {
            name: name.to_string(),
            description: None,
            target_amount: target,
            current_amount: current,
            deadline,
            priority,
        }
    }

    /// Emergency fund of 10 000.00, a fifth saved, due end of 2025
    pub fn emergency_fund() -> NewGoal {
        Self::goal(
            "Reserva de emergência",
            dec!(10000.00),
            dec!(2000.00),
            DateFixtures::date(2025, 12, 31),
            5,
        )
    }

    /// 1 000 initial, 500 a month, 12% a year, compounded over 12 months
    pub fn reference_projection() -> (Decimal, Decimal, Decimal, InterestType, u32) {
        (dec!(1000), dec!(500), dec!(12), InterestType::Compound, 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emails_are_lower_case() {
        let email = UserFixtures::email();
        assert_eq!(email, email.to_lowercase());
        assert!(email.contains('@'));
    }

    #[test]
    fn test_strong_password_passes_rules() {
        assert!(domain_identity::validate_password_strength(UserFixtures::strong_password()).is_ok());
    }

    #[test]
    fn test_emergency_fund_is_valid() {
        assert!(InvestmentFixtures::emergency_fund().validate().is_ok());
    }
}
