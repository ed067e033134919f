//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the finance core, built on SQLx.
//!
//! # Architecture
//!
//! - [`repositories`] own the SQL and work with row types
//! - [`adapters`] implement the domain ports on top of the repositories
//! - [`pool`] builds the connection pool and runs the embedded migrations
//!
//! Every table holding user data carries a `user_id` column, and every query
//! on it filters by the caller's id.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresBudgetAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/finance")).await?;
//! run_migrations(&pool).await?;
//! let budget = PostgresBudgetAdapter::new(pool.clone());
//! ```

pub mod adapters;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::{
    PostgresBillingAdapter, PostgresBudgetAdapter, PostgresIdentityAdapter, PostgresInvestmentAdapter,
};
pub use error::DatabaseError;
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool, MIGRATOR};
