//! Request and response bodies
//!
//! Field names are camelCase on the wire. Money travels as JSON numbers and is
//! converted to two-place decimals on the way in.

pub mod auth;
pub mod budget;
pub mod cards;
pub mod dashboard;
pub mod investment;

use axum::{http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::Serialize;
use std::borrow::Cow;
use validator::ValidationError;

use core_kernel::money::from_f64;

use crate::error::ApiError;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, data })
    }

    pub fn created(data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok(data))
    }
}

/// Success envelope carrying only a message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

/// Converts a validated request amount into a stored decimal
pub(crate) fn to_amount(value: f64) -> Result<Decimal, ApiError> {
    from_f64(value).map_err(|_| ApiError::Validation("Valor deve ser um número".to_string()))
}

/// Like [`to_amount`], but a value that rounds to zero cents is rejected with `message`
pub(crate) fn to_positive_amount(value: f64, message: &str) -> Result<Decimal, ApiError> {
    let amount = to_amount(value)?;
    if amount <= Decimal::ZERO {
        return Err(ApiError::Validation(message.to_string()));
    }
    Ok(amount)
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub(crate) fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if domain_budget::category::is_hex_color(value) {
        Ok(())
    } else {
        Err(invalid("hex_color", "Cor inválida (formato: #RRGGBB)"))
    }
}

pub(crate) fn validate_last_digits(value: &str) -> Result<(), ValidationError> {
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(invalid("last_digits", "Informe os 4 últimos dígitos"))
    }
}

pub(crate) fn validate_password_rules(value: &str) -> Result<(), ValidationError> {
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(invalid("uppercase", "Senha deve conter pelo menos uma letra maiúscula"));
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid("digit", "Senha deve conter pelo menos um número"));
    }
    Ok(())
}

pub(crate) fn default_color() -> String {
    domain_budget::DEFAULT_CATEGORY_COLOR.to_string()
}

pub(crate) fn default_true() -> bool {
    true
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn request_amount_keeps_whole_cents(cents in 1i64..99_999_999_900i64) {
            let value = cents as f64 / 100.0;
            prop_assert_eq!(to_amount(value).unwrap(), Decimal::new(cents, 2));
        }
    }
}
