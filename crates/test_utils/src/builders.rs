//! Test Data Builders
//!
//! Builders for stored entities, for tests of pure domain logic (dashboard
//! aggregation, card statements) that need records without a store.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{
    CardPurchaseId, CategoryId, CreditCardId, ExpenseId, FixedExpenseId, IncomeId, UserId,
};
use domain_billing::{CardBrand, CardPurchase, CreditCard, DEFAULT_CARD_COLOR};
use domain_budget::{
    Category, CategoryType, Expense, ExpenseType, FixedExpense, Frequency, Income, IncomeType,
};

use crate::fixtures::DateFixtures;

/// Builder for stored expenses
pub struct ExpenseBuilder {
    user_id: UserId,
    category_id: Option<CategoryId>,
    name: String,
    amount: Decimal,
    date: NaiveDate,
    expense_type: ExpenseType,
}

impl ExpenseBuilder {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            category_id: None,
            name: "Despesa".to_string(),
            amount: dec!(100.00),
            date: DateFixtures::mid_reference_month(),
            expense_type: ExpenseType::Variable,
        }
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn fixed(mut self) -> Self {
        self.expense_type = ExpenseType::Fixed;
        self
    }

    pub fn build(self) -> Expense {
        let now = Utc::now();
        Expense {
            id: ExpenseId::new_v7(),
            user_id: self.user_id,
            category_id: self.category_id,
            name: self.name,
            description: None,
            amount: self.amount,
            date: self.date,
            expense_type: self.expense_type,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Builder for stored incomes
pub struct IncomeBuilder {
    user_id: UserId,
    amount: Decimal,
    date: NaiveDate,
    income_type: IncomeType,
}

impl IncomeBuilder {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            amount: dec!(5000.00),
            date: DateFixtures::date(2024, 5, 5),
            income_type: IncomeType::Salary,
        }
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn kind(mut self, income_type: IncomeType) -> Self {
        self.income_type = income_type;
        self
    }

    pub fn build(self) -> Income {
        let now = Utc::now();
        Income {
            id: IncomeId::new_v7(),
            user_id: self.user_id,
            name: self.income_type.to_string(),
            description: None,
            amount: self.amount,
            date: self.date,
            income_type: self.income_type,
            is_recurring: self.income_type == IncomeType::Salary,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A stored expense category
pub fn category(user_id: UserId, name: &str, color: &str) -> Category {
    let now = Utc::now();
    Category {
        id: CategoryId::new_v7(),
        user_id,
        name: name.to_string(),
        color: color.to_string(),
        icon: None,
        category_type: CategoryType::Expense,
        created_at: now,
        updated_at: now,
    }
}

/// A stored, active, monthly fixed expense
pub fn fixed_expense(user_id: UserId, name: &str, amount: Decimal, due_day: u32) -> FixedExpense {
    let now = Utc::now();
    FixedExpense {
        id: FixedExpenseId::new_v7(),
        user_id,
        category_id: None,
        name: name.to_string(),
        description: None,
        amount,
        due_day,
        frequency: Frequency::Monthly,
        is_active: true,
        last_paid_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// Builder for stored credit cards
pub struct CreditCardBuilder {
    user_id: UserId,
    limit: Decimal,
    closing_day: u32,
    due_day: u32,
}

impl CreditCardBuilder {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            limit: dec!(1000.00),
            closing_day: 10,
            due_day: 17,
        }
    }

    pub fn limit(mut self, limit: Decimal) -> Self {
        self.limit = limit;
        self
    }

    pub fn closing_day(mut self, day: u32) -> Self {
        self.closing_day = day;
        self
    }

    pub fn build(self) -> CreditCard {
        let now = Utc::now();
        CreditCard {
            id: CreditCardId::new_v7(),
            user_id: self.user_id,
            name: "Cartão".to_string(),
            last_digits: None,
            brand: CardBrand::Visa,
            limit: self.limit,
            closing_day: self.closing_day,
            due_day: self.due_day,
            color: DEFAULT_CARD_COLOR.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A stored purchase on `card`
pub fn card_purchase(card: &CreditCard, total: Decimal, installments: u32, date: NaiveDate) -> CardPurchase {
    let now = Utc::now();
    CardPurchase {
        id: CardPurchaseId::new_v7(),
        user_id: card.user_id,
        credit_card_id: card.id,
        category_id: None,
        name: "Compra".to_string(),
        description: None,
        total_amount: total,
        installments,
        purchase_date: date,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_builder_defaults() {
        let user = UserId::new();
        let expense = ExpenseBuilder::new(user).amount(dec!(12.34)).build();
        assert_eq!(expense.user_id, user);
        assert_eq!(expense.amount, dec!(12.34));
        assert_eq!(expense.category_id, None);
        assert!(DateFixtures::reference_month().contains(expense.date));
    }

    #[test]
    fn test_purchase_belongs_to_card() {
        let card = CreditCardBuilder::new(UserId::new()).closing_day(5).build();
        let purchase = card_purchase(&card, dec!(90), 3, DateFixtures::date(2024, 5, 6));
        assert_eq!(purchase.credit_card_id, card.id);
        assert_eq!(purchase.user_id, card.user_id);
    }
}
