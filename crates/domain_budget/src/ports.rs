//! Budget Domain Ports
//!
//! `BudgetPort` covers categories, expenses, incomes and fixed expenses. All
//! operations are scoped by user; foreign records are reported as
//! `PortError::NotFound`.

use async_trait::async_trait;

use core_kernel::{CategoryId, DomainPort, ExpenseId, FixedExpenseId, IncomeId, PortError, UserId};

use crate::category::{Category, NewCategory};
use crate::expense::{Expense, ExpenseFilter, NewExpense};
use crate::fixed_expense::{FixedExpense, NewFixedExpense};
use crate::income::{Income, IncomeFilter, NewIncome};
use crate::kinds::CategoryType;

/// Storage operations for the budget domain
#[async_trait]
pub trait BudgetPort: DomainPort {
    // ========================================================================
    // Categories
    // ========================================================================

    /// Lists categories ordered by name, optionally of one type
    async fn list_categories(
        &self,
        user_id: UserId,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>, PortError>;

    async fn get_category(&self, user_id: UserId, id: CategoryId) -> Result<Category, PortError>;

    /// Creates a category
    ///
    /// # Returns
    ///
    /// The new category, or `PortError::Conflict` if the user already has a
    /// category with that name
    async fn create_category(&self, user_id: UserId, category: NewCategory) -> Result<Category, PortError>;

    /// Creates several categories at once (used to seed new accounts)
    async fn create_categories(
        &self,
        user_id: UserId,
        categories: Vec<NewCategory>,
    ) -> Result<Vec<Category>, PortError>;

    /// Deletes a category; expenses referencing it become uncategorized
    async fn delete_category(&self, user_id: UserId, id: CategoryId) -> Result<(), PortError>;

    // ========================================================================
    // Expenses
    // ========================================================================

    /// Lists matching expenses, most recent date first
    async fn list_expenses(&self, user_id: UserId, filter: ExpenseFilter) -> Result<Vec<Expense>, PortError>;

    async fn get_expense(&self, user_id: UserId, id: ExpenseId) -> Result<Expense, PortError>;

    async fn create_expense(&self, user_id: UserId, expense: NewExpense) -> Result<Expense, PortError>;

    async fn update_expense(
        &self,
        user_id: UserId,
        id: ExpenseId,
        expense: NewExpense,
    ) -> Result<Expense, PortError>;

    async fn delete_expense(&self, user_id: UserId, id: ExpenseId) -> Result<(), PortError>;

    // ========================================================================
    // Incomes
    // ========================================================================

    /// Lists matching incomes, most recent date first
    async fn list_incomes(&self, user_id: UserId, filter: IncomeFilter) -> Result<Vec<Income>, PortError>;

    async fn get_income(&self, user_id: UserId, id: IncomeId) -> Result<Income, PortError>;

    async fn create_income(&self, user_id: UserId, income: NewIncome) -> Result<Income, PortError>;

    async fn update_income(&self, user_id: UserId, id: IncomeId, income: NewIncome) -> Result<Income, PortError>;

    async fn delete_income(&self, user_id: UserId, id: IncomeId) -> Result<(), PortError>;

    // ========================================================================
    // Fixed expenses
    // ========================================================================

    /// Lists fixed expenses ordered by due day
    async fn list_fixed_expenses(&self, user_id: UserId) -> Result<Vec<FixedExpense>, PortError>;

    async fn get_fixed_expense(&self, user_id: UserId, id: FixedExpenseId) -> Result<FixedExpense, PortError>;

    async fn create_fixed_expense(
        &self,
        user_id: UserId,
        expense: NewFixedExpense,
    ) -> Result<FixedExpense, PortError>;

    async fn update_fixed_expense(
        &self,
        user_id: UserId,
        id: FixedExpenseId,
        expense: NewFixedExpense,
    ) -> Result<FixedExpense, PortError>;

    /// Sets `last_paid_at` to now when `paid`, clears it otherwise
    async fn mark_fixed_expense_paid(
        &self,
        user_id: UserId,
        id: FixedExpenseId,
        paid: bool,
    ) -> Result<FixedExpense, PortError>;

    async fn delete_fixed_expense(&self, user_id: UserId, id: FixedExpenseId) -> Result<(), PortError>;
}
