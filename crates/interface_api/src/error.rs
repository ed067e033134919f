//! API error handling
//!
//! Every failure answers with `{"error": <message>, "code": <machine code>}`.
//! Internal failures are logged and replaced by a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::{PortError, TemporalError};
use domain_billing::BillingError;
use domain_budget::BudgetError;
use domain_identity::IdentityError;
use domain_investment::InvestmentError;

use crate::auth::AuthError;

const INTERNAL_MESSAGE: &str = "Erro interno do servidor";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Detail is logged, never sent
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Validation(_) => "validation_error",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Conflict(_) => "conflict",
            ApiError::Unavailable(_) => "service_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match self {
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Request failed");
                INTERNAL_MESSAGE.to_string()
            }
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Validation(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unavailable(msg) => msg,
        };

        (status, Json(ErrorResponse { error: message, code })).into_response()
    }
}

/// User-facing message for a record that does not exist for the caller
fn not_found_message(entity_type: &str) -> String {
    match entity_type {
        "Category" => "Categoria não encontrada",
        "Expense" => "Despesa não encontrada",
        "Income" => "Receita não encontrada",
        "FixedExpense" => "Gasto fixo não encontrado",
        "CreditCard" => "Cartão não encontrado",
        "CardPurchase" => "Compra não encontrada",
        "Goal" => "Meta não encontrada",
        "Simulation" => "Simulação não encontrada",
        "User" => "Usuário não encontrado",
        _ => "Registro não encontrado",
    }
    .to_string()
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, .. } => ApiError::NotFound(not_found_message(&entity_type)),
            PortError::Validation { message, .. } => ApiError::Validation(message),
            PortError::Conflict { message } => ApiError::Conflict(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::WeakPassword(msg) => ApiError::Validation(msg.to_string()),
            IdentityError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            IdentityError::EmailTaken => ApiError::Conflict(err.to_string()),
            IdentityError::UnknownResetToken
            | IdentityError::ResetTokenUsed
            | IdentityError::ResetTokenExpired => ApiError::BadRequest(err.to_string()),
            IdentityError::Port(port) => port.into(),
            IdentityError::Hashing(_) | IdentityError::Notification(_) => {
                ApiError::Internal(format!("{err:?}"))
            }
        }
    }
}

impl From<InvestmentError> for ApiError {
    fn from(err: InvestmentError) -> Self {
        match err {
            InvestmentError::InvalidProjection { message, .. }
            | InvestmentError::InvalidGoal { message, .. } => ApiError::Validation(message),
            InvestmentError::NonFiniteProjection(_) => {
                ApiError::Validation("Valor projetado excede o limite permitido".to_string())
            }
            InvestmentError::Money(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<TemporalError> for ApiError {
    fn from(err: TemporalError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(detail) => ApiError::Internal(detail),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // field_errors() is a HashMap; report the alphabetically first field
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Dados inválidos".to_string());

        ApiError::Validation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_not_found_is_localized() {
        let err: ApiError = PortError::not_found("CreditCard", "abc").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Cartão não encontrado"));
    }

    #[test]
    fn test_identity_errors_map_to_statuses() {
        let err: ApiError = IdentityError::InvalidCredentials.into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let err: ApiError = IdentityError::EmailTaken.into();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: ApiError = IdentityError::ResetTokenExpired.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = IdentityError::Notification("smtp down".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_projection_error_keeps_message() {
        let err: ApiError = InvestmentError::invalid("periodMonths", "Período máximo de 50 anos").into();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Período máximo de 50 anos"));
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn test_connection_failure_is_internal() {
        let err: ApiError = PortError::connection("refused").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
