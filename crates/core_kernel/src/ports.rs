//! Ports and Adapters Infrastructure
//!
//! Every domain crate declares its storage boundary as a port trait extending
//! [`DomainPort`]. The PostgreSQL adapters in `infra_db` and the in-memory
//! adapters in `test_utils` both implement those traits, so handlers never see
//! which backend they are talking to.
//!
//! ```text
//!            HTTP handlers (interface_api)
//!                       │
//!                       ▼
//!   BudgetPort, CreditCardPort, InvestmentPort, UserPort
//!        (declared in domain_*, return PortError)
//!              ▲                         ▲
//!     ┌────────┴────────┐       ┌────────┴────────┐
//!     │ Postgres adapter│       │ In-memory adapter│
//!     │    (infra_db)   │       │   (test_utils)   │
//!     └─────────────────┘       └──────────────────┘
//! ```
//!
//! All lookups are scoped by the owning user. A record that exists but belongs
//! to another user is reported as `NotFound`, never as a permission failure.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by any storage port
///
/// Only `NotFound`, `Validation` and `Conflict` reach the client with their
/// own status; the other two surface as a generic 500.
#[derive(Debug, Error)]
pub enum PortError {
    /// Missing, or owned by someone else
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: String, id: String },

    /// The store rejected the values (check or foreign key constraint)
    #[error("rejected by store: {message}")]
    Validation { message: String },

    /// A uniqueness rule was hit, e.g. two categories with the same name
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// The store could not be reached
    #[error("store unavailable: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Source>,
    },

    #[error("store failure: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Source>,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict { message: message.into() }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection { message: message.into(), source: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal { message: message.into(), source: None }
    }

    /// Connection failures may succeed when retried
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared as
/// `Arc<dyn XPort>` across async handlers.
pub trait DomainPort: Send + Sync + 'static {}

/// Status reported by a readiness probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
    /// The probe itself could not run
    Unknown,
}

/// Outcome of one readiness probe, rendered as-is by `/health/ready`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    /// Failure detail, absent when healthy
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Builds a healthy result stamped with the current time
    pub fn healthy(adapter_id: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Builds an unhealthy result carrying the failure message
    pub fn unhealthy(adapter_id: impl Into<String>, latency_ms: u64, message: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(message.into()),
            checked_at: chrono::Utc::now(),
        }
    }
}

/// Adapters probed by the readiness endpoint
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Runs a cheap round trip against the backing store
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let err = PortError::not_found("Expense", "123");
        assert!(err.is_not_found());
        assert!(!err.is_transient());
        assert!(err.to_string().contains("Expense"));
    }

    #[test]
    fn test_port_error_transient() {
        assert!(PortError::connection("refused").is_transient());
        assert!(!PortError::conflict("duplicate").is_transient());
    }

    #[test]
    fn test_health_result_constructors() {
        let ok = HealthCheckResult::healthy("postgres", 3);
        assert_eq!(ok.status, AdapterHealth::Healthy);
        assert!(ok.message.is_none());

        let bad = HealthCheckResult::unhealthy("postgres", 5000, "timeout");
        assert_eq!(bad.status, AdapterHealth::Unhealthy);
        assert_eq!(bad.message.as_deref(), Some("timeout"));
    }
}
