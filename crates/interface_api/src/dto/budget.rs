//! Category, expense, income and fixed expense DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use core_kernel::money::to_f64;
use core_kernel::{CategoryId, ExpenseId, FixedExpenseId, IncomeId, Timezone};
use domain_budget::{
    Category, CategoryType, Expense, ExpenseType, FixedExpense, Frequency, Income, IncomeType,
    NewCategory, NewExpense, NewFixedExpense, NewIncome, UpcomingFixedExpense, Urgency,
};

use super::{default_color, default_true, to_positive_amount, validate_hex_color};
use crate::error::ApiError;

/// Also reported when a positive value rounds to zero cents
pub(crate) const AMOUNT_MESSAGE: &str = "Valor deve ser positivo e no máximo 999.999.999";

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "Nome deve ter entre 1 e 50 caracteres"))]
    pub name: String,
    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
    #[validate(length(max = 50, message = "Ícone deve ter no máximo 50 caracteres"))]
    pub icon: Option<String>,
    #[serde(rename = "type", default)]
    pub category_type: CategoryType,
}

impl From<CreateCategoryRequest> for NewCategory {
    fn from(request: CreateCategoryRequest) -> Self {
        NewCategory {
            name: request.name,
            color: request.color,
            icon: request.icon,
            category_type: request.category_type,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
            icon: category.icon.clone(),
            category_type: category.category_type,
            created_at: category.created_at,
        }
    }
}

/// Category lookup used to embed categories in expense responses
pub struct CategoryIndex(HashMap<CategoryId, CategoryResponse>);

impl CategoryIndex {
    pub fn new(categories: &[Category]) -> Self {
        Self(categories.iter().map(|c| (c.id, c.into())).collect())
    }

    pub fn get(&self, id: Option<CategoryId>) -> Option<CategoryResponse> {
        id.and_then(|id| self.0.get(&id).cloned())
    }
}

// ============================================================================
// Expenses
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseQuery {
    pub category_id: Option<CategoryId>,
    #[serde(rename = "type")]
    pub expense_type: Option<ExpenseType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    #[validate(length(min = 1, max = 100, message = "Nome deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[validate(length(max = 500, message = "Descrição deve ter no máximo 500 caracteres"))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, max = 999_999_999.0, message = "Valor deve ser positivo e no máximo 999.999.999"))]
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub category_id: Option<CategoryId>,
}

impl ExpenseRequest {
    pub fn into_new(self) -> Result<NewExpense, ApiError> {
        Ok(NewExpense {
            name: self.name,
            description: self.description,
            amount: to_positive_amount(self.amount, AMOUNT_MESSAGE)?,
            date: self.date,
            expense_type: self.expense_type,
            category_id: self.category_id,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: ExpenseId,
    pub name: String,
    pub description: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub category_id: Option<CategoryId>,
    pub category: Option<CategoryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExpenseResponse {
    pub fn new(expense: Expense, categories: &CategoryIndex) -> Self {
        Self {
            id: expense.id,
            category: categories.get(expense.category_id),
            name: expense.name,
            description: expense.description,
            amount: to_f64(expense.amount),
            date: expense.date,
            expense_type: expense.expense_type,
            category_id: expense.category_id,
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        }
    }
}

// ============================================================================
// Incomes
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeQuery {
    #[serde(rename = "type")]
    pub income_type: Option<IncomeType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRequest {
    #[validate(length(min = 1, max = 100, message = "Nome deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[validate(length(max = 500, message = "Descrição deve ter no máximo 500 caracteres"))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, max = 999_999_999.0, message = "Valor deve ser positivo e no máximo 999.999.999"))]
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub income_type: IncomeType,
    #[serde(default)]
    pub is_recurring: bool,
}

impl IncomeRequest {
    pub fn into_new(self) -> Result<NewIncome, ApiError> {
        Ok(NewIncome {
            name: self.name,
            description: self.description,
            amount: to_positive_amount(self.amount, AMOUNT_MESSAGE)?,
            date: self.date,
            income_type: self.income_type,
            is_recurring: self.is_recurring,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeResponse {
    pub id: IncomeId,
    pub name: String,
    pub description: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub income_type: IncomeType,
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Income> for IncomeResponse {
    fn from(income: Income) -> Self {
        Self {
            id: income.id,
            name: income.name,
            description: income.description,
            amount: to_f64(income.amount),
            date: income.date,
            income_type: income.income_type,
            is_recurring: income.is_recurring,
            created_at: income.created_at,
            updated_at: income.updated_at,
        }
    }
}

// ============================================================================
// Fixed expenses
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpenseRequest {
    #[validate(length(min = 1, max = 100, message = "Nome deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[validate(length(max = 500, message = "Descrição deve ter no máximo 500 caracteres"))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, max = 999_999_999.0, message = "Valor deve ser positivo e no máximo 999.999.999"))]
    pub amount: f64,
    #[validate(range(min = 1, max = 31, message = "Dia deve ser entre 1 e 31"))]
    pub due_day: u32,
    pub frequency: Frequency,
    pub category_id: Option<CategoryId>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl FixedExpenseRequest {
    pub fn into_new(self) -> Result<NewFixedExpense, ApiError> {
        Ok(NewFixedExpense {
            name: self.name,
            description: self.description,
            amount: to_positive_amount(self.amount, AMOUNT_MESSAGE)?,
            due_day: self.due_day,
            frequency: self.frequency,
            category_id: self.category_id,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidRequest {
    pub mark_as_paid: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpenseResponse {
    pub id: FixedExpenseId,
    pub name: String,
    pub description: Option<String>,
    pub amount: f64,
    pub due_day: u32,
    pub frequency: Frequency,
    pub category_id: Option<CategoryId>,
    pub category: Option<CategoryResponse>,
    pub is_active: bool,
    pub last_paid_at: Option<DateTime<Utc>>,
    /// Marked paid during the current month
    pub is_paid_this_month: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FixedExpenseResponse {
    pub fn new(expense: FixedExpense, categories: &CategoryIndex, timezone: Timezone) -> Self {
        Self {
            is_paid_this_month: expense.is_paid_in(timezone.current_month(), timezone),
            id: expense.id,
            category: categories.get(expense.category_id),
            name: expense.name,
            description: expense.description,
            amount: to_f64(expense.amount),
            due_day: expense.due_day,
            frequency: expense.frequency,
            category_id: expense.category_id,
            is_active: expense.is_active,
            last_paid_at: expense.last_paid_at,
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        }
    }
}

/// A fixed expense in the dashboard's due-date alert list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingFixedExpenseResponse {
    #[serde(flatten)]
    pub expense: FixedExpenseResponse,
    pub days_until_due: u32,
    pub urgency: Urgency,
}

impl UpcomingFixedExpenseResponse {
    pub fn new(upcoming: UpcomingFixedExpense, categories: &CategoryIndex, timezone: Timezone) -> Self {
        Self {
            expense: FixedExpenseResponse::new(upcoming.expense, categories, timezone),
            days_until_due: upcoming.days_until_due,
            urgency: upcoming.urgency,
        }
    }
}
