//! Credit cards and their monthly statements

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::money::to_f64;
use core_kernel::{CardPurchaseId, CreditCardId, UserId, YearMonth};

use crate::cycle::{installment_schedule, statement_total, StatementSummary};
use crate::error::BillingError;
use crate::purchase::CardPurchase;

/// Colour used when a card is created without one
pub const DEFAULT_CARD_COLOR: &str = "#8b5cf6";

/// Card network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Elo,
    Amex,
    Hipercard,
    Other,
}

impl CardBrand {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "VISA",
            CardBrand::Mastercard => "MASTERCARD",
            CardBrand::Elo => "ELO",
            CardBrand::Amex => "AMEX",
            CardBrand::Hipercard => "HIPERCARD",
            CardBrand::Other => "OTHER",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardBrand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VISA" => Ok(CardBrand::Visa),
            "MASTERCARD" => Ok(CardBrand::Mastercard),
            "ELO" => Ok(CardBrand::Elo),
            "AMEX" => Ok(CardBrand::Amex),
            "HIPERCARD" => Ok(CardBrand::Hipercard),
            "OTHER" => Ok(CardBrand::Other),
            other => Err(format!("Unknown card brand: {}", other)),
        }
    }
}

/// A user's credit card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: CreditCardId,
    pub user_id: UserId,
    pub name: String,
    /// Last four digits of the card number
    pub last_digits: Option<String>,
    pub brand: CardBrand,
    pub limit: Decimal,
    /// Day of month the statement closes (1-31)
    pub closing_day: u32,
    /// Day of month the statement is due (1-31)
    pub due_day: u32,
    pub color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One installment billed on a statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    pub purchase_id: CardPurchaseId,
    pub name: String,
    /// 1-based installment number
    pub installment_number: u32,
    pub installments: u32,
    pub amount: f64,
}

/// A card's statement for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardStatement {
    pub reference_month: YearMonth,
    pub summary: StatementSummary,
    pub lines: Vec<StatementLine>,
}

impl CreditCard {
    /// Statement total and limit utilization for `reference`
    ///
    /// # Arguments
    ///
    /// * `purchases` - Purchases made with this card
    /// * `reference` - Statement month
    pub fn statement_summary(
        &self,
        purchases: &[CardPurchase],
        reference: YearMonth,
    ) -> Result<StatementSummary, BillingError> {
        let plans: Vec<_> = purchases.iter().map(CardPurchase::plan).collect();
        let total = statement_total(&plans, self.closing_day, reference)?;
        Ok(StatementSummary::new(total, Some(to_f64(self.limit))))
    }

    /// Full statement for `reference`, including each billed installment
    pub fn statement(
        &self,
        purchases: &[CardPurchase],
        reference: YearMonth,
    ) -> Result<CardStatement, BillingError> {
        let mut lines = Vec::new();
        for purchase in purchases {
            let schedule = installment_schedule(&purchase.plan(), self.closing_day)?;
            lines.extend(
                schedule
                    .into_iter()
                    .filter(|installment| installment.billing_month == reference)
                    .map(|installment| StatementLine {
                        purchase_id: purchase.id,
                        name: purchase.name.clone(),
                        installment_number: installment.number,
                        installments: purchase.installments,
                        amount: installment.amount,
                    }),
            );
        }

        let total = lines.iter().map(|line| line.amount).sum();
        Ok(CardStatement {
            reference_month: reference,
            summary: StatementSummary::new(total, Some(to_f64(self.limit))),
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_round_trip_text() {
        for brand in [
            CardBrand::Visa,
            CardBrand::Mastercard,
            CardBrand::Elo,
            CardBrand::Amex,
            CardBrand::Hipercard,
            CardBrand::Other,
        ] {
            assert_eq!(brand.as_str().parse::<CardBrand>().unwrap(), brand);
        }
        assert!("DINERS".parse::<CardBrand>().is_err());
    }

    fn card(closing_day: u32) -> CreditCard {
        let now = Utc::now();
        CreditCard {
            id: CreditCardId::new(),
            user_id: UserId::new(),
            name: "Nubank".to_string(),
            last_digits: None,
            brand: CardBrand::Mastercard,
            limit: Decimal::from(1000),
            closing_day,
            due_day: 20,
            color: DEFAULT_CARD_COLOR.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_card_has_full_credit() {
        let summary = card(10).statement_summary(&[], YearMonth::new(2024, 3).unwrap()).unwrap();
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.available_credit, 1000.0);
    }

    #[test]
    fn test_summary_rejects_bad_closing_day_without_purchases() {
        let result = card(0).statement_summary(&[], YearMonth::new(2024, 3).unwrap());
        assert_eq!(result, Err(BillingError::InvalidClosingDay(0)));
    }

    #[test]
    fn test_brand_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&CardBrand::Mastercard).unwrap(), "\"MASTERCARD\"");
    }
}
