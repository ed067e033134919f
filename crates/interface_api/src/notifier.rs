//! Password reset delivery

use async_trait::async_trait;
use tracing::info;

use domain_identity::{IdentityError, ResetNotice, ResetNotifier};

/// Logs the reset link instead of mailing it
///
/// Mail delivery is handled outside this service; operators relay the link
/// from the log.
#[derive(Debug, Clone)]
pub struct LogResetNotifier {
    public_url: String,
}

impl LogResetNotifier {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            public_url: public_url.into(),
        }
    }

    pub fn reset_link(&self, token: &str) -> String {
        format!("{}/reset-password?token={}", self.public_url.trim_end_matches('/'), token)
    }
}

#[async_trait]
impl ResetNotifier for LogResetNotifier {
    async fn send_reset(&self, notice: &ResetNotice) -> Result<(), IdentityError> {
        info!(
            email = %notice.email,
            link = %self.reset_link(&notice.token),
            "Password reset link issued"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_link_joins_without_double_slash() {
        let notifier = LogResetNotifier::new("https://app.example.com/");
        assert_eq!(
            notifier.reset_link("abc123"),
            "https://app.example.com/reset-password?token=abc123"
        );
    }

    #[tokio::test]
    async fn test_send_reset_never_fails() {
        let notifier = LogResetNotifier::new("http://localhost:3000");
        let notice = ResetNotice {
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            token: "t".repeat(64),
        };
        assert!(notifier.send_reset(&notice).await.is_ok());
    }
}
