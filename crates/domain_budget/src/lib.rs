//! Budget Domain - Day-to-day money tracking
//!
//! Categories, one-off expenses, incomes and recurring fixed expenses, plus
//! the dashboard aggregation built from them.
//!
//! Records are plain data owned by one user. Persistence goes through
//! [`ports::BudgetPort`]; the aggregation in [`dashboard`] is pure.

pub mod category;
pub mod dashboard;
pub mod error;
pub mod expense;
pub mod fixed_expense;
pub mod income;
pub mod kinds;
pub mod ports;

pub use category::{default_expense_categories, Category, NewCategory, DEFAULT_CATEGORY_COLOR};
pub use dashboard::{CategoryBreakdown, DashboardSummary, MonthlyTotals};
pub use error::BudgetError;
pub use expense::{Expense, ExpenseFilter, NewExpense};
pub use fixed_expense::{
    days_until_due, upcoming_fixed_expenses, FixedExpense, NewFixedExpense,
    UpcomingFixedExpense, Urgency,
};
pub use income::{Income, IncomeFilter, NewIncome};
pub use kinds::{CategoryType, ExpenseType, Frequency, IncomeType};
pub use ports::BudgetPort;
