//! Password rules and hashing
//!
//! Hashes are Argon2id PHC strings with a random salt, so the same password
//! never hashes twice to the same value.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::IdentityError;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 100;

/// Checks the strength rules applied at registration and reset
///
/// # Errors
///
/// `IdentityError::WeakPassword` with the first rule the password breaks.
pub fn validate_password_strength(password: &str) -> Result<(), IdentityError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(IdentityError::WeakPassword(
            "Senha deve ter pelo menos 6 caracteres",
        ));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(IdentityError::WeakPassword(
            "Senha deve ter no máximo 100 caracteres",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(IdentityError::WeakPassword(
            "Senha deve conter pelo menos uma letra maiúscula",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(IdentityError::WeakPassword(
            "Senha deve conter pelo menos um número",
        ));
    }
    Ok(())
}

/// Hashes a password into a PHC string
pub fn hash_password(password: &str) -> Result<String, IdentityError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| IdentityError::Hashing(e.to_string()))
}

/// Checks a password against a stored PHC string
///
/// A malformed stored hash never verifies.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_rules_in_order() {
        let message = |p: &str| validate_password_strength(p).unwrap_err().to_string();

        assert_eq!(message("Ab1"), "Senha deve ter pelo menos 6 caracteres");
        assert_eq!(message("abcdef1"), "Senha deve conter pelo menos uma letra maiúscula");
        assert_eq!(message("Abcdefg"), "Senha deve conter pelo menos um número");
        assert_eq!(message(&"A1".repeat(51)), "Senha deve ter no máximo 100 caracteres");
        assert!(validate_password_strength("Senha1").is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Segredo1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Segredo1", &hash));
        assert!(!verify_password("segredo1", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        assert_ne!(hash_password("Segredo1").unwrap(), hash_password("Segredo1").unwrap());
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("Segredo1", "not-a-hash"));
        assert!(!verify_password("", ""));
    }
}
