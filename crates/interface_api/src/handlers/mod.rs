//! Request handlers, one module per resource

pub mod auth;
pub mod categories;
pub mod credit_cards;
pub mod dashboard;
pub mod expenses;
pub mod fixed_expenses;
pub mod goals;
pub mod health;
pub mod incomes;
pub mod simulations;
