//! Domain Adapters
//!
//! PostgreSQL implementations of the domain ports. Each adapter wraps a
//! repository, converts rows into domain types and translates
//! `DatabaseError` into `PortError`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresBudgetAdapter;
//! use domain_budget::BudgetPort;
//!
//! let port: Arc<dyn BudgetPort> = Arc::new(PostgresBudgetAdapter::new(pool));
//! let categories = port.list_categories(user_id, None).await?;
//! ```

pub mod billing;
pub mod budget;
pub mod identity;
pub mod investment;

pub use billing::PostgresBillingAdapter;
pub use budget::PostgresBudgetAdapter;
pub use identity::PostgresIdentityAdapter;
pub use investment::PostgresInvestmentAdapter;

use std::fmt::Display;
use std::str::FromStr;
use std::time::Instant;

use sqlx::PgPool;

use core_kernel::HealthCheckResult;

use crate::error::DatabaseError;

/// Parses a text-coded column back into its domain enum
pub(crate) fn decode<T: FromStr>(column: &str, value: &str) -> Result<T, DatabaseError> {
    value
        .parse()
        .map_err(|_| DatabaseError::corrupt(column, value))
}

/// Converts a non-negative integer column into `u32`
pub(crate) fn unsigned<N>(column: &str, value: N) -> Result<u32, DatabaseError>
where
    N: Copy + Display + TryInto<u32>,
{
    value
        .try_into()
        .map_err(|_| DatabaseError::corrupt(column, value))
}

/// Runs `SELECT 1` against the pool and reports the outcome
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult::healthy(adapter_id, latency_ms),
        Err(e) => HealthCheckResult::unhealthy(adapter_id, latency_ms, format!("Database error: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_budget::ExpenseType;

    #[test]
    fn test_decode_known_variant() {
        let kind: ExpenseType = decode("expense_type", "VARIABLE").unwrap();
        assert_eq!(kind, ExpenseType::Variable);
    }

    #[test]
    fn test_decode_unknown_variant_is_corrupt_row() {
        let err = decode::<ExpenseType>("expense_type", "WEEKLY").unwrap_err();
        assert!(matches!(err, DatabaseError::CorruptRow(_)));
    }

    #[test]
    fn test_unsigned_rejects_negative() {
        assert_eq!(unsigned("due_day", 17i32).unwrap(), 17);
        assert!(unsigned("due_day", -1i32).is_err());
        assert_eq!(unsigned("priority", 3i16).unwrap(), 3);
    }
}
