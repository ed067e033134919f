//! Identity domain errors
//!
//! Messages are the ones shown to end users.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the identity domain
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Password fails the strength rules
    #[error("{0}")]
    WeakPassword(&'static str),

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Email ou senha inválidos")]
    InvalidCredentials,

    #[error("Este email já está cadastrado")]
    EmailTaken,

    #[error("Link de recuperação inválido ou já utilizado.")]
    UnknownResetToken,

    #[error("Este link já foi utilizado. Solicite um novo.")]
    ResetTokenUsed,

    #[error("Link expirado. Solicite um novo link de recuperação.")]
    ResetTokenExpired,

    /// The password hasher rejected its input
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// The reset notice could not be delivered
    #[error("Erro ao enviar email. Verifique a configuração SMTP do servidor.")]
    Notification(String),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl IdentityError {
    /// Returns true for errors caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            IdentityError::WeakPassword(_)
                | IdentityError::InvalidCredentials
                | IdentityError::EmailTaken
                | IdentityError::UnknownResetToken
                | IdentityError::ResetTokenUsed
                | IdentityError::ResetTokenExpired
        )
    }
}
