//! Credit card DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::money::to_f64;
use core_kernel::{CardPurchaseId, CategoryId, CreditCardId, YearMonth};
use domain_billing::{
    CardBrand, CardPurchase, CardStatement, CreditCard, NewCardPurchase, NewCreditCard,
    StatementLine, StatementSummary,
};

use super::budget::AMOUNT_MESSAGE;
use super::{
    default_color, default_true, to_positive_amount, validate_hex_color, validate_last_digits,
};
use crate::error::ApiError;

const LIMIT_MESSAGE: &str = "Limite deve ser positivo e no máximo 999.999.999";

fn default_installments() -> u32 {
    1
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardRequest {
    #[validate(length(min = 1, max = 100, message = "Nome deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[validate(custom(function = "validate_last_digits"))]
    pub last_digits: Option<String>,
    pub brand: CardBrand,
    #[validate(range(exclusive_min = 0.0, max = 999_999_999.0, message = "Limite deve ser positivo e no máximo 999.999.999"))]
    pub limit: f64,
    #[validate(range(min = 1, max = 31, message = "Dia deve ser entre 1 e 31"))]
    pub closing_day: u32,
    #[validate(range(min = 1, max = 31, message = "Dia deve ser entre 1 e 31"))]
    pub due_day: u32,
    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CreditCardRequest {
    pub fn into_new(self) -> Result<NewCreditCard, ApiError> {
        Ok(NewCreditCard {
            name: self.name,
            last_digits: self.last_digits,
            brand: self.brand,
            limit: to_positive_amount(self.limit, LIMIT_MESSAGE)?,
            closing_day: self.closing_day,
            due_day: self.due_day,
            color: self.color,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    #[validate(length(min = 1, max = 100, message = "Nome deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[validate(length(max = 500, message = "Descrição deve ter no máximo 500 caracteres"))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, max = 999_999_999.0, message = "Valor deve ser positivo e no máximo 999.999.999"))]
    pub total_amount: f64,
    #[serde(default = "default_installments")]
    #[validate(range(min = 1, max = 48, message = "Parcelas devem ser entre 1 e 48"))]
    pub installments: u32,
    pub date: NaiveDate,
    pub category_id: Option<CategoryId>,
}

impl PurchaseRequest {
    pub fn into_new(self) -> Result<NewCardPurchase, ApiError> {
        Ok(NewCardPurchase {
            name: self.name,
            description: self.description,
            total_amount: to_positive_amount(self.total_amount, AMOUNT_MESSAGE)?,
            installments: self.installments,
            purchase_date: self.date,
            category_id: self.category_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatementQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl StatementQuery {
    /// Requested month, or `current` unless both parts are given
    pub fn reference(&self, current: YearMonth) -> Result<YearMonth, ApiError> {
        match (self.year, self.month) {
            (Some(year), Some(month)) => Ok(YearMonth::new(year, month)?),
            _ => Ok(current),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub id: CardPurchaseId,
    pub credit_card_id: CreditCardId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    pub total_amount: f64,
    pub installments: u32,
    pub installment_amount: f64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CardPurchase> for PurchaseResponse {
    type Error = ApiError;

    fn try_from(purchase: CardPurchase) -> Result<Self, Self::Error> {
        Ok(Self {
            installment_amount: purchase.installment_amount()?,
            id: purchase.id,
            credit_card_id: purchase.credit_card_id,
            category_id: purchase.category_id,
            name: purchase.name,
            description: purchase.description,
            total_amount: to_f64(purchase.total_amount),
            installments: purchase.installments,
            date: purchase.purchase_date,
            created_at: purchase.created_at,
            updated_at: purchase.updated_at,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementSummaryResponse {
    pub reference_month: YearMonth,
    pub total: f64,
    pub utilization_percent: f64,
    pub available_credit: f64,
}

impl StatementSummaryResponse {
    pub fn new(reference_month: YearMonth, summary: StatementSummary) -> Self {
        Self {
            reference_month,
            total: summary.total,
            utilization_percent: summary.utilization_percent,
            available_credit: summary.available_credit,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardResponse {
    pub id: CreditCardId,
    pub name: String,
    pub last_digits: Option<String>,
    pub brand: CardBrand,
    pub limit: f64,
    pub closing_day: u32,
    pub due_day: u32,
    pub color: String,
    pub is_active: bool,
    pub expenses: Vec<PurchaseResponse>,
    pub statement: StatementSummaryResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreditCardResponse {
    /// Card with its purchases and the statement for `reference`
    pub fn new(
        card: CreditCard,
        purchases: Vec<CardPurchase>,
        reference: YearMonth,
    ) -> Result<Self, ApiError> {
        let summary = card.statement_summary(&purchases, reference)?;
        let expenses = purchases
            .into_iter()
            .map(PurchaseResponse::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: card.id,
            name: card.name,
            last_digits: card.last_digits,
            brand: card.brand,
            limit: to_f64(card.limit),
            closing_day: card.closing_day,
            due_day: card.due_day,
            color: card.color,
            is_active: card.is_active,
            expenses,
            statement: StatementSummaryResponse::new(reference, summary),
            created_at: card.created_at,
            updated_at: card.updated_at,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementLineResponse {
    pub purchase_id: CardPurchaseId,
    pub name: String,
    pub installment_number: u32,
    pub installments: u32,
    pub amount: f64,
}

impl From<StatementLine> for StatementLineResponse {
    fn from(line: StatementLine) -> Self {
        Self {
            purchase_id: line.purchase_id,
            name: line.name,
            installment_number: line.installment_number,
            installments: line.installments,
            amount: line.amount,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStatementResponse {
    pub credit_card_id: CreditCardId,
    pub summary: StatementSummaryResponse,
    pub lines: Vec<StatementLineResponse>,
}

impl CardStatementResponse {
    pub fn new(card_id: CreditCardId, statement: CardStatement) -> Self {
        Self {
            credit_card_id: card_id,
            summary: StatementSummaryResponse::new(statement.reference_month, statement.summary),
            lines: statement.lines.into_iter().map(Into::into).collect(),
        }
    }
}
