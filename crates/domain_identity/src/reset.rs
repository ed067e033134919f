//! Password reset tokens
//!
//! A token is 32 random bytes, hex encoded, valid for one hour and usable once.
//! Requesting a new token marks every earlier unused token of the user as used.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use core_kernel::{ResetTokenId, UserId};

use crate::error::IdentityError;

/// Random bytes per token before hex encoding
pub const RESET_TOKEN_BYTES: usize = 32;

/// How long a token stays valid
pub fn reset_token_ttl() -> Duration {
    Duration::hours(1)
}

/// A stored reset token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetToken {
    pub id: ResetTokenId,
    pub user_id: UserId,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl ResetToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Checks the token can still reset a password
    ///
    /// # Errors
    ///
    /// `ResetTokenUsed` takes precedence over `ResetTokenExpired`.
    pub fn check_usable(&self, now: DateTime<Utc>) -> Result<(), IdentityError> {
        if self.used {
            return Err(IdentityError::ResetTokenUsed);
        }
        if self.is_expired(now) {
            return Err(IdentityError::ResetTokenExpired);
        }
        Ok(())
    }
}

/// A freshly generated token, not yet stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResetToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl NewResetToken {
    /// Generates a token expiring one hour after `now`
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self {
            token: generate_token(),
            expires_at: now + reset_token_ttl(),
        }
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);

    let mut token = String::with_capacity(RESET_TOKEN_BYTES * 2);
    for byte in bytes {
        // Writing to a String cannot fail.
        let _ = write!(token, "{:02x}", byte);
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(used: bool, expires_at: DateTime<Utc>) -> ResetToken {
        ResetToken {
            id: ResetTokenId::new(),
            user_id: UserId::new(),
            token: "abc".to_string(),
            expires_at,
            used,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_generated_token_shape() {
        let now = Utc::now();
        let generated = NewResetToken::generate(now);

        assert_eq!(generated.token.len(), 64);
        assert!(generated.token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(generated.expires_at - now, Duration::hours(1));
    }

    #[test]
    fn test_tokens_are_unique() {
        let now = Utc::now();
        assert_ne!(NewResetToken::generate(now).token, NewResetToken::generate(now).token);
    }

    #[test]
    fn test_used_wins_over_expired() {
        let now = Utc::now();
        let t = token(true, now - Duration::minutes(1));
        assert!(matches!(t.check_usable(now), Err(IdentityError::ResetTokenUsed)));
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        assert!(token(false, now).check_usable(now).is_ok());
        assert!(matches!(
            token(false, now).check_usable(now + Duration::seconds(1)),
            Err(IdentityError::ResetTokenExpired)
        ));
    }
}
