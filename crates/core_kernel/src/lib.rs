//! Core Kernel - Foundational types for the personal finance system
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Strongly-typed identifiers for user-owned records
//! - Money limits, percentage rounding and the `f64` bridge used by the calculators
//! - Calendar-month arithmetic (`YearMonth`) for billing cycles and dashboards
//! - Port infrastructure for the hexagonal storage boundary

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::MoneyError;
pub use temporal::{YearMonth, DateRange, Timezone, TemporalError};
pub use identifiers::{
    UserId, CategoryId, ExpenseId, IncomeId, FixedExpenseId,
    CreditCardId, CardPurchaseId, GoalId, SimulationId, ResetTokenId,
};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
