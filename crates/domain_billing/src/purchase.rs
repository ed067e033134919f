//! Credit card purchases
//!
//! A purchase is charged once and billed over `installments` monthly
//! statements. Amounts are stored as `Decimal`; the allocator sees them through
//! [`CardPurchase::plan`].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::money::to_f64;
use core_kernel::{CardPurchaseId, CategoryId, CreditCardId, UserId};

use crate::cycle::InstallmentPlan;
use crate::error::BillingError;

/// Upper bound on installments accepted on the write path
pub const MAX_INSTALLMENTS: u32 = 48;

/// A purchase made with a credit card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPurchase {
    pub id: CardPurchaseId,
    pub user_id: UserId,
    pub credit_card_id: CreditCardId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    /// Full amount, split evenly over the installments
    pub total_amount: Decimal,
    pub installments: u32,
    pub purchase_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CardPurchase {
    /// The allocator's view of this purchase
    pub fn plan(&self) -> InstallmentPlan {
        InstallmentPlan::new(to_f64(self.total_amount), self.installments, self.purchase_date)
    }

    /// Nominal amount of each installment
    pub fn installment_amount(&self) -> Result<f64, BillingError> {
        self.plan().installment_amount()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn purchase(total: Decimal, installments: u32) -> CardPurchase {
        let now = Utc::now();
        CardPurchase {
            id: CardPurchaseId::new_v7(),
            user_id: UserId::new(),
            credit_card_id: CreditCardId::new(),
            category_id: None,
            name: "Notebook".to_string(),
            description: None,
            total_amount: total,
            installments,
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_installment_amount_equal_split() {
        let p = purchase(dec!(300), 3);
        assert_eq!(p.installment_amount().unwrap(), 100.0);
    }

    #[test]
    fn test_odd_split_is_not_rounded() {
        let amount = purchase(dec!(100), 3).installment_amount().unwrap();
        assert!((amount - 33.333_333).abs() < 1e-6);
    }

    #[test]
    fn test_zero_installments_fail() {
        assert_eq!(
            purchase(dec!(100), 0).installment_amount(),
            Err(BillingError::InvalidInstallments(0))
        );
    }
}
