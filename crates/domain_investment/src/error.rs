//! Investment domain errors

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the investment domain
#[derive(Debug, Error, PartialEq)]
pub enum InvestmentError {
    /// A projection input is out of range
    #[error("{message}")]
    InvalidProjection {
        field: &'static str,
        message: String,
    },

    /// A goal field is out of range
    #[error("{message}")]
    InvalidGoal {
        field: &'static str,
        message: String,
    },

    /// The calculator produced NaN, an infinity, or a value too large to store
    #[error("Projected amount is not a storable number: {0}")]
    NonFiniteProjection(String),

    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl InvestmentError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        InvestmentError::InvalidProjection {
            field,
            message: message.into(),
        }
    }

    pub fn invalid_goal(field: &'static str, message: impl Into<String>) -> Self {
        InvestmentError::InvalidGoal {
            field,
            message: message.into(),
        }
    }

    /// Name of the offending input field, when the error is about one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            InvestmentError::InvalidProjection { field, .. }
            | InvestmentError::InvalidGoal { field, .. } => Some(field),
            _ => None,
        }
    }
}
