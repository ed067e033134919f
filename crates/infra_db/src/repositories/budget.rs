//! Budget repository: categories, expenses, incomes and fixed expenses
//!
//! Every statement is scoped by `user_id`; a row owned by another user is
//! indistinguishable from a missing one.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

// ============================================================================
// Rows
// ============================================================================

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub category_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub category_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRow {
    pub expense_id: Uuid,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub expense_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct IncomeRow {
    pub income_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub income_date: NaiveDate,
    pub income_type: String,
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct FixedExpenseRow {
    pub fixed_expense_id: Uuid,
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub due_day: i32,
    pub frequency: String,
    pub is_active: bool,
    pub last_paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Write models
// ============================================================================

#[derive(Debug, Clone)]
pub struct CategoryValues {
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub category_type: &'static str,
}

#[derive(Debug, Clone)]
pub struct ExpenseValues {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub expense_type: &'static str,
}

#[derive(Debug, Clone)]
pub struct IncomeValues {
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub income_type: &'static str,
    pub is_recurring: bool,
}

#[derive(Debug, Clone)]
pub struct FixedExpenseValues {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub due_day: i32,
    pub frequency: &'static str,
    pub is_active: bool,
}

/// Optional list criteria; `None` disables a criterion
#[derive(Debug, Clone, Default)]
pub struct ListCriteria {
    pub category_id: Option<Uuid>,
    pub kind: Option<&'static str>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: Option<i64>,
}

const CATEGORY_COLUMNS: &str =
    "category_id, user_id, name, color, icon, category_type, created_at, updated_at";
const EXPENSE_COLUMNS: &str = "expense_id, user_id, category_id, name, description, amount, \
     expense_date, expense_type, created_at, updated_at";
const INCOME_COLUMNS: &str = "income_id, user_id, name, description, amount, income_date, \
     income_type, is_recurring, created_at, updated_at";
const FIXED_COLUMNS: &str = "fixed_expense_id, user_id, category_id, name, description, amount, \
     due_day, frequency, is_active, last_paid_at, created_at, updated_at";

/// Repository for the budget tables
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    pool: PgPool,
}

impl BudgetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Categories
    // ========================================================================

    pub async fn list_categories(
        &self,
        user_id: Uuid,
        category_type: Option<&'static str>,
    ) -> Result<Vec<CategoryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            r#"
            SELECT {CATEGORY_COLUMNS} FROM categories
            WHERE user_id = $1 AND ($2::text IS NULL OR category_type = $2)
            ORDER BY name ASC
            "#
        ))
        .bind(user_id)
        .bind(category_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_category(&self, user_id: Uuid, category_id: Uuid) -> Result<CategoryRow, DatabaseError> {
        sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE category_id = $1 AND user_id = $2"
        ))
        .bind(category_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Category", category_id))
    }

    /// Inserts categories in one transaction; any duplicate name aborts all
    pub async fn insert_categories(
        &self,
        user_id: Uuid,
        categories: Vec<(Uuid, CategoryValues)>,
    ) -> Result<Vec<CategoryRow>, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let mut rows = Vec::with_capacity(categories.len());

        for (category_id, values) in categories {
            let row = sqlx::query_as::<_, CategoryRow>(&format!(
                r#"
                INSERT INTO categories (category_id, user_id, name, color, icon, category_type)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING {CATEGORY_COLUMNS}
                "#
            ))
            .bind(category_id)
            .bind(user_id)
            .bind(&values.name)
            .bind(&values.color)
            .bind(&values.icon)
            .bind(values.category_type)
            .fetch_one(&mut *tx)
            .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(rows)
    }

    pub async fn delete_category(&self, user_id: Uuid, category_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1 AND user_id = $2")
            .bind(category_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Category", category_id));
        }
        Ok(())
    }

    // ========================================================================
    // Expenses
    // ========================================================================

    pub async fn list_expenses(
        &self,
        user_id: Uuid,
        criteria: &ListCriteria,
    ) -> Result<Vec<ExpenseRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(&format!(
            r#"
            SELECT {EXPENSE_COLUMNS} FROM expenses
            WHERE user_id = $1
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::text IS NULL OR expense_type = $3)
              AND ($4::date IS NULL OR expense_date >= $4)
              AND ($5::date IS NULL OR expense_date <= $5)
            ORDER BY expense_date DESC, created_at DESC
            LIMIT $6
            "#
        ))
        .bind(user_id)
        .bind(criteria.category_id)
        .bind(criteria.kind)
        .bind(criteria.start)
        .bind(criteria.end)
        .bind(criteria.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_expense(&self, user_id: Uuid, expense_id: Uuid) -> Result<ExpenseRow, DatabaseError> {
        sqlx::query_as::<_, ExpenseRow>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE expense_id = $1 AND user_id = $2"
        ))
        .bind(expense_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Expense", expense_id))
    }

    pub async fn insert_expense(
        &self,
        user_id: Uuid,
        expense_id: Uuid,
        values: &ExpenseValues,
    ) -> Result<ExpenseRow, DatabaseError> {
        let row = sqlx::query_as::<_, ExpenseRow>(&format!(
            r#"
            INSERT INTO expenses (expense_id, user_id, category_id, name, description,
                                  amount, expense_date, expense_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(expense_id)
        .bind(user_id)
        .bind(values.category_id)
        .bind(&values.name)
        .bind(&values.description)
        .bind(values.amount)
        .bind(values.date)
        .bind(values.expense_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_expense(
        &self,
        user_id: Uuid,
        expense_id: Uuid,
        values: &ExpenseValues,
    ) -> Result<ExpenseRow, DatabaseError> {
        sqlx::query_as::<_, ExpenseRow>(&format!(
            r#"
            UPDATE expenses
            SET category_id = $3, name = $4, description = $5, amount = $6,
                expense_date = $7, expense_type = $8, updated_at = now()
            WHERE expense_id = $1 AND user_id = $2
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(expense_id)
        .bind(user_id)
        .bind(values.category_id)
        .bind(&values.name)
        .bind(&values.description)
        .bind(values.amount)
        .bind(values.date)
        .bind(values.expense_type)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Expense", expense_id))
    }

    pub async fn delete_expense(&self, user_id: Uuid, expense_id: Uuid) -> Result<(), DatabaseError> {
        self.delete_owned("expenses", "expense_id", "Expense", user_id, expense_id)
            .await
    }

    // ========================================================================
    // Incomes
    // ========================================================================

    pub async fn list_incomes(
        &self,
        user_id: Uuid,
        criteria: &ListCriteria,
    ) -> Result<Vec<IncomeRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, IncomeRow>(&format!(
            r#"
            SELECT {INCOME_COLUMNS} FROM incomes
            WHERE user_id = $1
              AND ($2::text IS NULL OR income_type = $2)
              AND ($3::date IS NULL OR income_date >= $3)
              AND ($4::date IS NULL OR income_date <= $4)
            ORDER BY income_date DESC, created_at DESC
            LIMIT $5
            "#
        ))
        .bind(user_id)
        .bind(criteria.kind)
        .bind(criteria.start)
        .bind(criteria.end)
        .bind(criteria.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_income(&self, user_id: Uuid, income_id: Uuid) -> Result<IncomeRow, DatabaseError> {
        sqlx::query_as::<_, IncomeRow>(&format!(
            "SELECT {INCOME_COLUMNS} FROM incomes WHERE income_id = $1 AND user_id = $2"
        ))
        .bind(income_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Income", income_id))
    }

    pub async fn insert_income(
        &self,
        user_id: Uuid,
        income_id: Uuid,
        values: &IncomeValues,
    ) -> Result<IncomeRow, DatabaseError> {
        let row = sqlx::query_as::<_, IncomeRow>(&format!(
            r#"
            INSERT INTO incomes (income_id, user_id, name, description, amount,
                                 income_date, income_type, is_recurring)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {INCOME_COLUMNS}
            "#
        ))
        .bind(income_id)
        .bind(user_id)
        .bind(&values.name)
        .bind(&values.description)
        .bind(values.amount)
        .bind(values.date)
        .bind(values.income_type)
        .bind(values.is_recurring)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_income(
        &self,
        user_id: Uuid,
        income_id: Uuid,
        values: &IncomeValues,
    ) -> Result<IncomeRow, DatabaseError> {
        sqlx::query_as::<_, IncomeRow>(&format!(
            r#"
            UPDATE incomes
            SET name = $3, description = $4, amount = $5, income_date = $6,
                income_type = $7, is_recurring = $8, updated_at = now()
            WHERE income_id = $1 AND user_id = $2
            RETURNING {INCOME_COLUMNS}
            "#
        ))
        .bind(income_id)
        .bind(user_id)
        .bind(&values.name)
        .bind(&values.description)
        .bind(values.amount)
        .bind(values.date)
        .bind(values.income_type)
        .bind(values.is_recurring)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Income", income_id))
    }

    pub async fn delete_income(&self, user_id: Uuid, income_id: Uuid) -> Result<(), DatabaseError> {
        self.delete_owned("incomes", "income_id", "Income", user_id, income_id)
            .await
    }

    // ========================================================================
    // Fixed expenses
    // ========================================================================

    pub async fn list_fixed_expenses(&self, user_id: Uuid) -> Result<Vec<FixedExpenseRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, FixedExpenseRow>(&format!(
            "SELECT {FIXED_COLUMNS} FROM fixed_expenses WHERE user_id = $1 ORDER BY due_day ASC, name ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_fixed_expense(
        &self,
        user_id: Uuid,
        fixed_expense_id: Uuid,
    ) -> Result<FixedExpenseRow, DatabaseError> {
        sqlx::query_as::<_, FixedExpenseRow>(&format!(
            "SELECT {FIXED_COLUMNS} FROM fixed_expenses WHERE fixed_expense_id = $1 AND user_id = $2"
        ))
        .bind(fixed_expense_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("FixedExpense", fixed_expense_id))
    }

    pub async fn insert_fixed_expense(
        &self,
        user_id: Uuid,
        fixed_expense_id: Uuid,
        values: &FixedExpenseValues,
    ) -> Result<FixedExpenseRow, DatabaseError> {
        let row = sqlx::query_as::<_, FixedExpenseRow>(&format!(
            r#"
            INSERT INTO fixed_expenses (fixed_expense_id, user_id, category_id, name, description,
                                        amount, due_day, frequency, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {FIXED_COLUMNS}
            "#
        ))
        .bind(fixed_expense_id)
        .bind(user_id)
        .bind(values.category_id)
        .bind(&values.name)
        .bind(&values.description)
        .bind(values.amount)
        .bind(values.due_day)
        .bind(values.frequency)
        .bind(values.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_fixed_expense(
        &self,
        user_id: Uuid,
        fixed_expense_id: Uuid,
        values: &FixedExpenseValues,
    ) -> Result<FixedExpenseRow, DatabaseError> {
        sqlx::query_as::<_, FixedExpenseRow>(&format!(
            r#"
            UPDATE fixed_expenses
            SET category_id = $3, name = $4, description = $5, amount = $6,
                due_day = $7, frequency = $8, is_active = $9, updated_at = now()
            WHERE fixed_expense_id = $1 AND user_id = $2
            RETURNING {FIXED_COLUMNS}
            "#
        ))
        .bind(fixed_expense_id)
        .bind(user_id)
        .bind(values.category_id)
        .bind(&values.name)
        .bind(&values.description)
        .bind(values.amount)
        .bind(values.due_day)
        .bind(values.frequency)
        .bind(values.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("FixedExpense", fixed_expense_id))
    }

    pub async fn set_last_paid(
        &self,
        user_id: Uuid,
        fixed_expense_id: Uuid,
        last_paid_at: Option<DateTime<Utc>>,
    ) -> Result<FixedExpenseRow, DatabaseError> {
        sqlx::query_as::<_, FixedExpenseRow>(&format!(
            r#"
            UPDATE fixed_expenses SET last_paid_at = $3, updated_at = now()
            WHERE fixed_expense_id = $1 AND user_id = $2
            RETURNING {FIXED_COLUMNS}
            "#
        ))
        .bind(fixed_expense_id)
        .bind(user_id)
        .bind(last_paid_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("FixedExpense", fixed_expense_id))
    }

    pub async fn delete_fixed_expense(&self, user_id: Uuid, fixed_expense_id: Uuid) -> Result<(), DatabaseError> {
        self.delete_owned(
            "fixed_expenses",
            "fixed_expense_id",
            "FixedExpense",
            user_id,
            fixed_expense_id,
        )
        .await
    }

    async fn delete_owned(
        &self,
        table: &'static str,
        key: &'static str,
        entity: &'static str,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE {key} = $1 AND user_id = $2"))
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(entity, id));
        }
        Ok(())
    }
}
