//! Billing Domain - Credit Cards and Statement Cycles
//!
//! This crate holds the credit card model and the billing cycle allocator that
//! places each installment of a purchase on a monthly statement.
//!
//! # Statement cycle
//!
//! A card closes its statement on a fixed day of the month. Purchases made on
//! or before that day are billed in the same month; later purchases move to the
//! next statement. Installment purchases then bill one equal share per month.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::cycle::{statement_total, InstallmentPlan};
//!
//! let plans: Vec<InstallmentPlan> = purchases.iter().map(|p| p.plan()).collect();
//! let total = statement_total(&plans, card.closing_day, timezone.current_month())?;
//! ```

pub mod card;
pub mod cycle;
pub mod error;
pub mod ports;
pub mod purchase;

pub use card::{CardBrand, CardStatement, CreditCard, StatementLine, DEFAULT_CARD_COLOR};
pub use cycle::{
    allocate_billing_month, installment_schedule, statement_total, Installment,
    InstallmentPlan, StatementSummary,
};
pub use error::BillingError;
pub use ports::{CreditCardPort, NewCardPurchase, NewCreditCard};
pub use purchase::{CardPurchase, MAX_INSTALLMENTS};
