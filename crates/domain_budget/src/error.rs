//! Budget domain errors

use thiserror::Error;

/// Errors that can occur in the budget domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Day of month outside 1-31
    #[error("Invalid day of month: {0}")]
    InvalidDay(u32),

    /// Unknown enum value read from storage or a query string
    #[error("Unknown {kind}: {value}")]
    UnknownVariant {
        kind: &'static str,
        value: String,
    },
}
