//! Test Utilities Crate
//!
//! Shared test infrastructure for the finance core workspace.
//!
//! # Modules
//!
//! - `memory`: in-memory implementations of every domain port
//! - `fixtures`: ready-made port inputs
//! - `builders`: stored entities for pure domain tests
//! - `database`: disposable PostgreSQL containers
//! - `assertions`: assertion helpers
//! - `generators`: proptest strategies

pub mod assertions;
pub mod builders;
pub mod database;
pub mod fixtures;
pub mod generators;
pub mod memory;

pub use assertions::*;
pub use builders::*;
pub use database::*;
pub use fixtures::*;
pub use generators::*;
pub use memory::*;
