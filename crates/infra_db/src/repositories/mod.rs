//! Repository implementations for domain entities
//!
//! Repositories own the SQL. They speak in row types with database-native
//! fields (UUIDs, text-coded enums, signed integers); the adapters translate
//! rows into domain types.
//!
//! Queries are runtime-checked `query_as` calls against `FromRow` rows, and
//! every statement on user-owned data filters by `user_id`.

pub mod budget;
pub mod cards;
pub mod investment;
pub mod users;

pub use budget::BudgetRepository;
pub use cards::CardRepository;
pub use investment::InvestmentRepository;
pub use users::UserRepository;
