//! Investment Domain - Projections, Simulations and Goals
//!
//! This crate provides:
//!
//! - The interest projection calculator (simple and compound accrual with a
//!   fixed monthly contribution) and the month-by-month series behind the
//!   simulator chart
//! - Saved simulations, which snapshot the projected amount at creation time
//! - Savings goals with progress and deadline tracking
//!
//! # Example
//!
//! ```rust
//! use domain_investment::projection::{project_investment, InterestType, ProjectionInput};
//!
//! let input = ProjectionInput::new(1000.0, 500.0, 12.0, 12, InterestType::Compound).unwrap();
//! let final_amount = project_investment(&input);
//!
//! assert!((final_amount - 7468.08).abs() < 0.01);
//! ```

pub mod error;
pub mod goal;
pub mod ports;
pub mod projection;
pub mod simulation;

pub use error::InvestmentError;
pub use goal::{goal_ordering, Goal, NewGoal};
pub use ports::InvestmentPort;
pub use projection::{
    future_value, project_investment, projection_series, InterestType, ProjectionInput,
    ProjectionPoint, ProjectionSeries, ProjectionSummary,
};
pub use simulation::{NewSimulation, Simulation};
