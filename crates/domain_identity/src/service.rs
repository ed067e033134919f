//! Account service
//!
//! Orchestrates registration, login and the password reset flow over a
//! [`UserPort`] and a [`ResetNotifier`].

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use core_kernel::PortError;

use crate::error::IdentityError;
use crate::password::{hash_password, validate_password_strength, verify_password};
use crate::ports::{ResetNotice, ResetNotifier, UserPort};
use crate::reset::NewResetToken;
use crate::user::{NewUser, User};

/// Service for account lifecycle operations
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserPort>,
    notifier: Arc<dyn ResetNotifier>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserPort>, notifier: Arc<dyn ResetNotifier>) -> Self {
        Self { users, notifier }
    }

    /// Registers a new user
    ///
    /// # Errors
    ///
    /// * `WeakPassword` if the password breaks a strength rule
    /// * `EmailTaken` if the email belongs to another user
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, IdentityError> {
        validate_password_strength(password)?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(IdentityError::EmailTaken);
        }

        let new_user = NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
        };

        // A concurrent registration can still win the race; the store's
        // unique constraint reports it as a conflict.
        let user = self.users.create_user(new_user).await.map_err(|e| match e {
            PortError::Conflict { .. } => IdentityError::EmailTaken,
            other => IdentityError::Port(other),
        })?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Checks a user's credentials
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown email or a wrong password alike.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, IdentityError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Login attempt for unknown email");
            return Err(IdentityError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash) {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(IdentityError::InvalidCredentials);
        }

        debug!(user_id = %user.id, "User authenticated");
        Ok(user)
    }

    /// Starts a password reset
    ///
    /// Succeeds silently for an unknown email so callers cannot probe which
    /// addresses are registered.
    ///
    /// # Errors
    ///
    /// `Notification` if the notifier fails; the new token stays stored.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), IdentityError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let invalidated = self.users.invalidate_reset_tokens(user.id).await?;
        let token = self
            .users
            .create_reset_token(user.id, NewResetToken::generate(Utc::now()))
            .await?;

        info!(user_id = %user.id, invalidated, "Password reset token issued");

        self.notifier
            .send_reset(&ResetNotice {
                email: user.email.clone(),
                name: user.name.clone(),
                token: token.token,
            })
            .await
    }

    /// Completes a password reset
    ///
    /// # Errors
    ///
    /// * `UnknownResetToken`, `ResetTokenUsed` or `ResetTokenExpired` for a bad token
    /// * `WeakPassword` if the new password breaks a strength rule
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), IdentityError> {
        validate_password_strength(password)?;

        let reset = self
            .users
            .find_reset_token(token)
            .await?
            .ok_or(IdentityError::UnknownResetToken)?;
        reset.check_usable(Utc::now())?;

        let password_hash = hash_password(password)?;
        self.users
            .reset_password(reset.id, reset.user_id, password_hash)
            .await?;

        info!(user_id = %reset.user_id, "Password reset completed");
        Ok(())
    }
}
