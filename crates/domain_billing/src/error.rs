//! Billing domain errors

use thiserror::Error;

/// Errors raised by the billing cycle allocator
#[derive(Debug, Error, PartialEq)]
pub enum BillingError {
    /// A purchase must be split into at least one installment
    #[error("Invalid installment count: {0} (must be at least 1)")]
    InvalidInstallments(u32),

    /// Statement closing day outside 1-31
    #[error("Invalid closing day: {0} (must be between 1 and 31)")]
    InvalidClosingDay(u32),
}
