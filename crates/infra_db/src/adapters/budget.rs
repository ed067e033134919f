//! PostgreSQL Budget Adapter
//!
//! Implements `BudgetPort` over `BudgetRepository`. Filters are flattened into
//! `ListCriteria`; text-coded columns are parsed back into the budget enums and
//! an unknown value is reported as a corrupt row.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use core_kernel::{
    CategoryId, DomainPort, ExpenseId, FixedExpenseId, HealthCheckResult, HealthCheckable, IncomeId,
    PortError, UserId,
};
use domain_budget::{
    BudgetPort, Category, CategoryType, Expense, ExpenseFilter, FixedExpense, Income, IncomeFilter,
    NewCategory, NewExpense, NewFixedExpense, NewIncome,
};

use crate::error::DatabaseError;
use crate::repositories::budget::{
    BudgetRepository, CategoryRow, CategoryValues, ExpenseRow, ExpenseValues, FixedExpenseRow,
    FixedExpenseValues, IncomeRow, IncomeValues, ListCriteria,
};

use super::{decode, unsigned};

const ADAPTER_ID: &str = "postgres-budget-adapter";

/// PostgreSQL-backed implementation of `BudgetPort`
#[derive(Debug, Clone)]
pub struct PostgresBudgetAdapter {
    repository: BudgetRepository,
    pool: PgPool,
}

impl PostgresBudgetAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BudgetRepository::new(pool.clone()),
            pool,
        }
    }
}

// ============================================================================
// Row conversion
// ============================================================================

fn category_from_row(row: CategoryRow) -> Result<Category, DatabaseError> {
    Ok(Category {
        id: CategoryId::from_uuid(row.category_id),
        user_id: UserId::from_uuid(row.user_id),
        category_type: decode("category_type", &row.category_type)?,
        name: row.name,
        color: row.color,
        icon: row.icon,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn expense_from_row(row: ExpenseRow) -> Result<Expense, DatabaseError> {
    Ok(Expense {
        id: ExpenseId::from_uuid(row.expense_id),
        user_id: UserId::from_uuid(row.user_id),
        category_id: row.category_id.map(CategoryId::from_uuid),
        expense_type: decode("expense_type", &row.expense_type)?,
        name: row.name,
        description: row.description,
        amount: row.amount,
        date: row.expense_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn income_from_row(row: IncomeRow) -> Result<Income, DatabaseError> {
    Ok(Income {
        id: IncomeId::from_uuid(row.income_id),
        user_id: UserId::from_uuid(row.user_id),
        income_type: decode("income_type", &row.income_type)?,
        name: row.name,
        description: row.description,
        amount: row.amount,
        date: row.income_date,
        is_recurring: row.is_recurring,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn fixed_expense_from_row(row: FixedExpenseRow) -> Result<FixedExpense, DatabaseError> {
    Ok(FixedExpense {
        id: FixedExpenseId::from_uuid(row.fixed_expense_id),
        user_id: UserId::from_uuid(row.user_id),
        category_id: row.category_id.map(CategoryId::from_uuid),
        due_day: unsigned("due_day", row.due_day)?,
        frequency: decode("frequency", &row.frequency)?,
        name: row.name,
        description: row.description,
        amount: row.amount,
        is_active: row.is_active,
        last_paid_at: row.last_paid_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn convert_all<R, T>(
    rows: Vec<R>,
    convert: fn(R) -> Result<T, DatabaseError>,
) -> Result<Vec<T>, PortError> {
    rows.into_iter()
        .map(convert)
        .collect::<Result<Vec<_>, _>>()
        .map_err(PortError::from)
}

// ============================================================================
// Write models
// ============================================================================

fn category_values(category: NewCategory) -> CategoryValues {
    CategoryValues {
        name: category.name,
        color: category.color,
        icon: category.icon,
        category_type: category.category_type.as_str(),
    }
}

fn expense_values(expense: NewExpense) -> ExpenseValues {
    ExpenseValues {
        category_id: expense.category_id.map(Uuid::from),
        name: expense.name,
        description: expense.description,
        amount: expense.amount,
        date: expense.date,
        expense_type: expense.expense_type.as_str(),
    }
}

fn income_values(income: NewIncome) -> IncomeValues {
    IncomeValues {
        name: income.name,
        description: income.description,
        amount: income.amount,
        date: income.date,
        income_type: income.income_type.as_str(),
        is_recurring: income.is_recurring,
    }
}

fn fixed_expense_values(expense: NewFixedExpense) -> FixedExpenseValues {
    FixedExpenseValues {
        category_id: expense.category_id.map(Uuid::from),
        name: expense.name,
        description: expense.description,
        amount: expense.amount,
        due_day: expense.due_day as i32,
        frequency: expense.frequency.as_str(),
        is_active: expense.is_active,
    }
}

fn expense_criteria(filter: &ExpenseFilter) -> ListCriteria {
    ListCriteria {
        category_id: filter.category_id.map(Uuid::from),
        kind: filter.expense_type.map(|t| t.as_str()),
        start: filter.date_range.map(|r| r.start),
        end: filter.date_range.map(|r| r.end),
        limit: filter.limit.map(i64::from),
    }
}

fn income_criteria(filter: &IncomeFilter) -> ListCriteria {
    ListCriteria {
        category_id: None,
        kind: filter.income_type.map(|t| t.as_str()),
        start: filter.date_range.map(|r| r.start),
        end: filter.date_range.map(|r| r.end),
        limit: filter.limit.map(i64::from),
    }
}

impl DomainPort for PostgresBudgetAdapter {}

#[async_trait]
impl HealthCheckable for PostgresBudgetAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, ADAPTER_ID).await
    }
}

#[async_trait]
impl BudgetPort for PostgresBudgetAdapter {
    // ========================================================================
    // Categories
    // ========================================================================

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_categories(
        &self,
        user_id: UserId,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>, PortError> {
        let rows = self
            .repository
            .list_categories(user_id.into(), category_type.map(|t| t.as_str()))
            .await?;
        debug!(count = rows.len(), "Categories listed");
        convert_all(rows, category_from_row)
    }

    #[instrument(skip(self), fields(user_id = %user_id, category_id = %id))]
    async fn get_category(&self, user_id: UserId, id: CategoryId) -> Result<Category, PortError> {
        let row = self.repository.get_category(user_id.into(), id.into()).await?;
        Ok(category_from_row(row)?)
    }

    #[instrument(skip(self, category), fields(user_id = %user_id))]
    async fn create_category(&self, user_id: UserId, category: NewCategory) -> Result<Category, PortError> {
        let mut created = self.create_categories(user_id, vec![category]).await?;
        created
            .pop()
            .ok_or_else(|| PortError::internal("category insert returned no row"))
    }

    #[instrument(skip(self, categories), fields(user_id = %user_id, count = categories.len()))]
    async fn create_categories(
        &self,
        user_id: UserId,
        categories: Vec<NewCategory>,
    ) -> Result<Vec<Category>, PortError> {
        let values: Vec<(Uuid, CategoryValues)> = categories
            .into_iter()
            .map(|c| (CategoryId::new_v7().into(), category_values(c)))
            .collect();
        let rows = self.repository.insert_categories(user_id.into(), values).await?;
        info!(count = rows.len(), "Categories created");
        convert_all(rows, category_from_row)
    }

    #[instrument(skip(self), fields(user_id = %user_id, category_id = %id))]
    async fn delete_category(&self, user_id: UserId, id: CategoryId) -> Result<(), PortError> {
        self.repository.delete_category(user_id.into(), id.into()).await?;
        info!("Category deleted");
        Ok(())
    }

    // ========================================================================
    // Expenses
    // ========================================================================

    #[instrument(skip(self, filter), fields(user_id = %user_id))]
    async fn list_expenses(&self, user_id: UserId, filter: ExpenseFilter) -> Result<Vec<Expense>, PortError> {
        let rows = self
            .repository
            .list_expenses(user_id.into(), &expense_criteria(&filter))
            .await?;
        debug!(count = rows.len(), "Expenses listed");
        convert_all(rows, expense_from_row)
    }

    #[instrument(skip(self), fields(user_id = %user_id, expense_id = %id))]
    async fn get_expense(&self, user_id: UserId, id: ExpenseId) -> Result<Expense, PortError> {
        let row = self.repository.get_expense(user_id.into(), id.into()).await?;
        Ok(expense_from_row(row)?)
    }

    #[instrument(skip(self, expense), fields(user_id = %user_id))]
    async fn create_expense(&self, user_id: UserId, expense: NewExpense) -> Result<Expense, PortError> {
        let id = ExpenseId::new_v7();
        let row = self
            .repository
            .insert_expense(user_id.into(), id.into(), &expense_values(expense))
            .await?;
        info!(expense_id = %id, "Expense created");
        Ok(expense_from_row(row)?)
    }

    #[instrument(skip(self, expense), fields(user_id = %user_id, expense_id = %id))]
    async fn update_expense(
        &self,
        user_id: UserId,
        id: ExpenseId,
        expense: NewExpense,
    ) -> Result<Expense, PortError> {
        let row = self
            .repository
            .update_expense(user_id.into(), id.into(), &expense_values(expense))
            .await?;
        info!("Expense updated");
        Ok(expense_from_row(row)?)
    }

    #[instrument(skip(self), fields(user_id = %user_id, expense_id = %id))]
    async fn delete_expense(&self, user_id: UserId, id: ExpenseId) -> Result<(), PortError> {
        self.repository.delete_expense(user_id.into(), id.into()).await?;
        info!("Expense deleted");
        Ok(())
    }

    // ========================================================================
    // Incomes
    // ========================================================================

    #[instrument(skip(self, filter), fields(user_id = %user_id))]
    async fn list_incomes(&self, user_id: UserId, filter: IncomeFilter) -> Result<Vec<Income>, PortError> {
        let rows = self
            .repository
            .list_incomes(user_id.into(), &income_criteria(&filter))
            .await?;
        debug!(count = rows.len(), "Incomes listed");
        convert_all(rows, income_from_row)
    }

    #[instrument(skip(self), fields(user_id = %user_id, income_id = %id))]
    async fn get_income(&self, user_id: UserId, id: IncomeId) -> Result<Income, PortError> {
        let row = self.repository.get_income(user_id.into(), id.into()).await?;
        Ok(income_from_row(row)?)
    }

    #[instrument(skip(self, income), fields(user_id = %user_id))]
    async fn create_income(&self, user_id: UserId, income: NewIncome) -> Result<Income, PortError> {
        let id = IncomeId::new_v7();
        let row = self
            .repository
            .insert_income(user_id.into(), id.into(), &income_values(income))
            .await?;
        info!(income_id = %id, "Income created");
        Ok(income_from_row(row)?)
    }

    #[instrument(skip(self, income), fields(user_id = %user_id, income_id = %id))]
    async fn update_income(&self, user_id: UserId, id: IncomeId, income: NewIncome) -> Result<Income, PortError> {
        let row = self
            .repository
            .update_income(user_id.into(), id.into(), &income_values(income))
            .await?;
        info!("Income updated");
        Ok(income_from_row(row)?)
    }

    #[instrument(skip(self), fields(user_id = %user_id, income_id = %id))]
    async fn delete_income(&self, user_id: UserId, id: IncomeId) -> Result<(), PortError> {
        self.repository.delete_income(user_id.into(), id.into()).await?;
        info!("Income deleted");
        Ok(())
    }

    // ========================================================================
    // Fixed expenses
    // ========================================================================

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_fixed_expenses(&self, user_id: UserId) -> Result<Vec<FixedExpense>, PortError> {
        let rows = self.repository.list_fixed_expenses(user_id.into()).await?;
        debug!(count = rows.len(), "Fixed expenses listed");
        convert_all(rows, fixed_expense_from_row)
    }

    #[instrument(skip(self), fields(user_id = %user_id, fixed_expense_id = %id))]
    async fn get_fixed_expense(&self, user_id: UserId, id: FixedExpenseId) -> Result<FixedExpense, PortError> {
        let row = self.repository.get_fixed_expense(user_id.into(), id.into()).await?;
        Ok(fixed_expense_from_row(row)?)
    }

    #[instrument(skip(self, expense), fields(user_id = %user_id))]
    async fn create_fixed_expense(
        &self,
        user_id: UserId,
        expense: NewFixedExpense,
    ) -> Result<FixedExpense, PortError> {
        let id = FixedExpenseId::new_v7();
        let row = self
            .repository
            .insert_fixed_expense(user_id.into(), id.into(), &fixed_expense_values(expense))
            .await?;
        info!(fixed_expense_id = %id, "Fixed expense created");
        Ok(fixed_expense_from_row(row)?)
    }

    #[instrument(skip(self, expense), fields(user_id = %user_id, fixed_expense_id = %id))]
    async fn update_fixed_expense(
        &self,
        user_id: UserId,
        id: FixedExpenseId,
        expense: NewFixedExpense,
    ) -> Result<FixedExpense, PortError> {
        let row = self
            .repository
            .update_fixed_expense(user_id.into(), id.into(), &fixed_expense_values(expense))
            .await?;
        info!("Fixed expense updated");
        Ok(fixed_expense_from_row(row)?)
    }

    #[instrument(skip(self), fields(user_id = %user_id, fixed_expense_id = %id))]
    async fn mark_fixed_expense_paid(
        &self,
        user_id: UserId,
        id: FixedExpenseId,
        paid: bool,
    ) -> Result<FixedExpense, PortError> {
        let last_paid_at = paid.then(Utc::now);
        let row = self
            .repository
            .set_last_paid(user_id.into(), id.into(), last_paid_at)
            .await?;
        info!(paid, "Fixed expense payment updated");
        Ok(fixed_expense_from_row(row)?)
    }

    #[instrument(skip(self), fields(user_id = %user_id, fixed_expense_id = %id))]
    async fn delete_fixed_expense(&self, user_id: UserId, id: FixedExpenseId) -> Result<(), PortError> {
        self.repository.delete_fixed_expense(user_id.into(), id.into()).await?;
        info!("Fixed expense deleted");
        Ok(())
    }
}
