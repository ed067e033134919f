//! PostgreSQL Identity Adapter
//!
//! Implements `UserPort` over `UserRepository`. The unique index on
//! `users.email` is the final arbiter of duplicate registrations: a racing
//! insert comes back as `PortError::Conflict`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, ResetTokenId, UserId};
use domain_identity::{NewResetToken, NewUser, ResetToken, User, UserPort};

use crate::repositories::users::{ResetTokenRow, UserRepository, UserRow};

const ADAPTER_ID: &str = "postgres-identity-adapter";

/// PostgreSQL-backed implementation of `UserPort`
#[derive(Debug, Clone)]
pub struct PostgresIdentityAdapter {
    repository: UserRepository,
    pool: PgPool,
}

impl PostgresIdentityAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool.clone()),
            pool,
        }
    }
}

fn user_from_row(row: UserRow) -> User {
    User {
        id: UserId::from_uuid(row.user_id),
        name: row.name,
        email: row.email,
        password_hash: row.password_hash,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn token_from_row(row: ResetTokenRow) -> ResetToken {
    ResetToken {
        id: ResetTokenId::from_uuid(row.token_id),
        user_id: UserId::from_uuid(row.user_id),
        token: row.token,
        expires_at: row.expires_at,
        used: row.used,
        created_at: row.created_at,
    }
}

impl DomainPort for PostgresIdentityAdapter {}

#[async_trait]
impl HealthCheckable for PostgresIdentityAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, ADAPTER_ID).await
    }
}

#[async_trait]
impl UserPort for PostgresIdentityAdapter {
    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortError> {
        debug!("Looking up user by email");
        let row = self.repository.find_by_email(email).await?;
        Ok(row.map(user_from_row))
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn get_user(&self, id: UserId) -> Result<User, PortError> {
        let row = self.repository.get_by_id(id.into()).await?;
        Ok(user_from_row(row))
    }

    #[instrument(skip(self, user))]
    async fn create_user(&self, user: NewUser) -> Result<User, PortError> {
        let id = UserId::new_v7();
        let row = self
            .repository
            .insert(id.into(), &user.name, &user.email, &user.password_hash)
            .await?;
        info!(user_id = %id, "User created");
        Ok(user_from_row(row))
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn invalidate_reset_tokens(&self, user_id: UserId) -> Result<u64, PortError> {
        let invalidated = self.repository.invalidate_tokens(user_id.into()).await?;
        debug!(invalidated, "Outstanding reset tokens invalidated");
        Ok(invalidated)
    }

    #[instrument(skip(self, token), fields(user_id = %user_id))]
    async fn create_reset_token(&self, user_id: UserId, token: NewResetToken) -> Result<ResetToken, PortError> {
        let id = ResetTokenId::new_v7();
        let row = self
            .repository
            .insert_token(id.into(), user_id.into(), &token.token, token.expires_at)
            .await?;
        info!(token_id = %id, expires_at = %row.expires_at, "Reset token issued");
        Ok(token_from_row(row))
    }

    #[instrument(skip(self, token))]
    async fn find_reset_token(&self, token: &str) -> Result<Option<ResetToken>, PortError> {
        let row = self.repository.find_token(token).await?;
        Ok(row.map(token_from_row))
    }

    #[instrument(skip(self, password_hash), fields(token_id = %token_id, user_id = %user_id))]
    async fn reset_password(
        &self,
        token_id: ResetTokenId,
        user_id: UserId,
        password_hash: String,
    ) -> Result<(), PortError> {
        self.repository
            .reset_password(token_id.into(), user_id.into(), &password_hash)
            .await?;
        info!("Password reset");
        Ok(())
    }
}
