//! Account DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_identity::UserProfile;

use super::validate_password_rules;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "Nome deve ter entre 2 e 100 caracteres"))]
    pub name: String,
    #[validate(email(message = "Email inválido"), length(max = 255, message = "Email deve ter no máximo 255 caracteres"))]
    pub email: String,
    #[validate(
        length(min = 6, max = 100, message = "Senha deve ter entre 6 e 100 caracteres"),
        custom(function = "validate_password_rules")
    )]
    pub password: String,
    #[validate(must_match(other = "password", message = "As senhas não coincidem"))]
    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 1, message = "Senha é obrigatória"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token é obrigatório"))]
    pub token: String,
    #[validate(
        length(min = 6, max = 100, message = "Senha deve ter entre 6 e 100 caracteres"),
        custom(function = "validate_password_rules")
    )]
    pub password: String,
    #[validate(must_match(other = "password", message = "As senhas não coincidem"))]
    pub confirm_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(register("Segredo123", "Segredo123").validate().is_ok());
    }

    #[test]
    fn test_mismatched_confirmation() {
        let errors = register("Segredo123", "Segredo124").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("confirm_password"));
    }

    #[test]
    fn test_password_without_digit() {
        let errors = register("Segredo", "Segredo").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_body_is_camel_case() {
        let body = r#"{"name":"Ana","email":"a@b.co","password":"Segredo1","confirmPassword":"Segredo1"}"#;
        let request: RegisterRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.confirm_password, "Segredo1");
    }
}
