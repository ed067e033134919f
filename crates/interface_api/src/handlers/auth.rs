//! Account handlers: registration, login and password reset

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use domain_budget::default_expense_categories;

use crate::auth::create_token;
use crate::dto::auth::*;
use crate::dto::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::AppState;

const RESET_REQUESTED: &str = "Se o email estiver cadastrado, você receberá um link de recuperação.";

/// Creates an account and seeds its default expense categories
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user = state
        .accounts
        .register(&request.name, &request.email, &request.password)
        .await?;

    let categories = state
        .budget
        .create_categories(user.id, default_expense_categories())
        .await?;
    info!(user_id = %user.id, categories = categories.len(), "Default categories created");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Conta criada com sucesso!".to_string(),
            user: user.profile(),
        }),
    ))
}

/// Exchanges credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let user = state
        .accounts
        .authenticate(&request.email, &request.password)
        .await?;

    let token = create_token(user.id, &state.config.jwt_secret, state.config.jwt_expiration_secs)?;

    Ok(ApiResponse::ok(LoginResponse {
        token,
        user: user.profile(),
    }))
}

/// Starts a password reset; the answer never reveals whether the email exists
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.accounts.request_password_reset(&request.email).await?;
    Ok(MessageResponse::new(RESET_REQUESTED))
}

/// Sets a new password using a reset token
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .accounts
        .reset_password(&request.token, &request.password)
        .await?;
    Ok(MessageResponse::new("Senha redefinida com sucesso!"))
}
