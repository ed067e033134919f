//! Identity Domain Ports
//!
//! `UserPort` stores users and reset tokens. `ResetNotifier` delivers a reset
//! token to its owner (email in production, a log line in development).

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, ResetTokenId, UserId};

use crate::error::IdentityError;
use crate::reset::{NewResetToken, ResetToken};
use crate::user::{NewUser, User};

/// Storage operations for users and their reset tokens
#[async_trait]
pub trait UserPort: DomainPort {
    // ========================================================================
    // Users
    // ========================================================================

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortError>;

    async fn get_user(&self, id: UserId) -> Result<User, PortError>;

    /// Stores a new user
    ///
    /// # Returns
    ///
    /// The stored user, or `PortError::Conflict` if the email is taken
    async fn create_user(&self, user: NewUser) -> Result<User, PortError>;

    // ========================================================================
    // Reset tokens
    // ========================================================================

    /// Marks every unused token of the user as used
    ///
    /// # Returns
    ///
    /// Number of tokens invalidated
    async fn invalidate_reset_tokens(&self, user_id: UserId) -> Result<u64, PortError>;

    async fn create_reset_token(
        &self,
        user_id: UserId,
        token: NewResetToken,
    ) -> Result<ResetToken, PortError>;

    async fn find_reset_token(&self, token: &str) -> Result<Option<ResetToken>, PortError>;

    /// Stores the new password hash and marks the token used in one transaction
    async fn reset_password(
        &self,
        token_id: ResetTokenId,
        user_id: UserId,
        password_hash: String,
    ) -> Result<(), PortError>;
}

/// What a user needs to reset their password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetNotice {
    pub email: String,
    pub name: String,
    pub token: String,
}

/// Delivers reset tokens to users
#[async_trait]
pub trait ResetNotifier: Send + Sync + 'static {
    /// # Errors
    ///
    /// `IdentityError::Notification` when delivery fails
    async fn send_reset(&self, notice: &ResetNotice) -> Result<(), IdentityError>;
}
