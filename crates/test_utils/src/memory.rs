//! In-Memory Port Implementations
//!
//! Storage-free versions of every domain port, used by service and HTTP tests.
//! They mirror the PostgreSQL adapters' observable behaviour: records are
//! scoped by user, foreign records are `NotFound`, duplicate category names
//! and emails are `Conflict`, deleting a category uncategorizes what
//! referenced it, and deleting a card removes its purchases.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use tokio::sync::{Mutex, RwLock};

use core_kernel::{
    CardPurchaseId, CategoryId, CreditCardId, DomainPort, ExpenseId, FixedExpenseId, GoalId,
    HealthCheckResult, HealthCheckable, IncomeId, PortError, ResetTokenId, SimulationId, UserId,
};
use domain_billing::{CardPurchase, CreditCard, CreditCardPort, NewCardPurchase, NewCreditCard};
use domain_budget::{
    BudgetPort, Category, CategoryType, Expense, ExpenseFilter, FixedExpense, Income, IncomeFilter,
    NewCategory, NewExpense, NewFixedExpense, NewIncome,
};
use domain_identity::{
    IdentityError, NewResetToken, NewUser, ResetNotice, ResetNotifier, ResetToken, User, UserPort,
};
use domain_investment::{goal_ordering, Goal, InvestmentPort, NewGoal, NewSimulation, Simulation};

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Default)]
struct UserState {
    users: Vec<User>,
    tokens: Vec<ResetToken>,
}

/// `UserPort` backed by vectors behind a lock
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    state: RwLock<UserState>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

impl DomainPort for InMemoryUserStore {}

#[async_trait]
impl UserPort for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_user(&self, id: UserId) -> Result<User, PortError> {
        let state = self.state.read().await;
        state
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("User", id))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, PortError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(PortError::conflict("email already registered"));
        }
        let now = Utc::now();
        let user = User {
            id: UserId::new_v7(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn invalidate_reset_tokens(&self, user_id: UserId) -> Result<u64, PortError> {
        let mut state = self.state.write().await;
        let mut invalidated = 0;
        for token in state.tokens.iter_mut().filter(|t| t.user_id == user_id && !t.used) {
            token.used = true;
            invalidated += 1;
        }
        Ok(invalidated)
    }

    async fn create_reset_token(&self, user_id: UserId, token: NewResetToken) -> Result<ResetToken, PortError> {
        let mut state = self.state.write().await;
        let token = ResetToken {
            id: ResetTokenId::new_v7(),
            user_id,
            token: token.token,
            expires_at: token.expires_at,
            used: false,
            created_at: Utc::now(),
        };
        state.tokens.push(token.clone());
        Ok(token)
    }

    async fn find_reset_token(&self, token: &str) -> Result<Option<ResetToken>, PortError> {
        let state = self.state.read().await;
        Ok(state.tokens.iter().find(|t| t.token == token).cloned())
    }

    async fn reset_password(
        &self,
        token_id: ResetTokenId,
        user_id: UserId,
        password_hash: String,
    ) -> Result<(), PortError> {
        let mut state = self.state.write().await;

        let token = state
            .tokens
            .iter_mut()
            .find(|t| t.id == token_id && !t.used)
            .ok_or_else(|| PortError::not_found("ResetToken", token_id))?;
        token.used = true;

        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| PortError::not_found("User", user_id))?;
        user.password_hash = password_hash;
        user.updated_at = Utc::now();
        Ok(())
    }
}

/// `ResetNotifier` that keeps every notice it is asked to send
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<ResetNotice>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every delivery fails
    pub fn failing() -> Self {
        Self {
            notices: Mutex::default(),
            fail: true,
        }
    }

    /// Notices sent so far, oldest first
    pub async fn notices(&self) -> Vec<ResetNotice> {
        self.notices.lock().await.clone()
    }
}

#[async_trait]
impl ResetNotifier for RecordingNotifier {
    async fn send_reset(&self, notice: &ResetNotice) -> Result<(), IdentityError> {
        if self.fail {
            return Err(IdentityError::Notification("mail relay unavailable".to_string()));
        }
        self.notices.lock().await.push(notice.clone());
        Ok(())
    }
}

// ============================================================================
// Budget, cards and investments
// ============================================================================

#[derive(Debug, Default)]
struct FinanceState {
    categories: Vec<Category>,
    expenses: Vec<Expense>,
    incomes: Vec<Income>,
    fixed_expenses: Vec<FixedExpense>,
    cards: Vec<CreditCard>,
    purchases: Vec<CardPurchase>,
    goals: Vec<Goal>,
    simulations: Vec<Simulation>,
}

/// `BudgetPort`, `CreditCardPort` and `InvestmentPort` over one shared state
///
/// Sharing the state lets category deletion reach card purchases the way the
/// foreign keys do in the database.
#[derive(Debug, Default)]
pub struct InMemoryFinanceStore {
    state: RwLock<FinanceState>,
}

impl InMemoryFinanceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryFinanceStore {}

#[async_trait]
impl HealthCheckable for InMemoryFinanceStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("in-memory-finance-store", 0)
    }
}

fn find_owned<'a, T>(
    items: &'a mut [T],
    entity: &'static str,
    id: impl std::fmt::Display + Copy,
    matches: impl Fn(&T) -> bool,
) -> Result<&'a mut T, PortError> {
    items
        .iter_mut()
        .find(|item| matches(item))
        .ok_or_else(|| PortError::not_found(entity, id))
}

fn remove_owned<T>(
    items: &mut Vec<T>,
    entity: &'static str,
    id: impl std::fmt::Display,
    matches: impl Fn(&T) -> bool,
) -> Result<T, PortError> {
    let index = items
        .iter()
        .position(|item| matches(item))
        .ok_or_else(|| PortError::not_found(entity, id))?;
    Ok(items.remove(index))
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::NaiveDate, DateTime<Utc>)) {
    items.sort_by_key(|item| Reverse(key(item)));
}

fn truncate_to(items: &mut Vec<impl Sized>, limit: Option<u32>) {
    if let Some(limit) = limit {
        items.truncate(limit as usize);
    }
}

#[async_trait]
impl BudgetPort for InMemoryFinanceStore {
    async fn list_categories(
        &self,
        user_id: UserId,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>, PortError> {
        let state = self.state.read().await;
        let mut categories: Vec<Category> = state
            .categories
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter(|c| category_type.map_or(true, |t| c.category_type == t))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn get_category(&self, user_id: UserId, id: CategoryId) -> Result<Category, PortError> {
        let state = self.state.read().await;
        state
            .categories
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Category", id))
    }

    async fn create_category(&self, user_id: UserId, category: NewCategory) -> Result<Category, PortError> {
        let mut created = self.create_categories(user_id, vec![category]).await?;
        created
            .pop()
            .ok_or_else(|| PortError::internal("category insert returned nothing"))
    }

    async fn create_categories(
        &self,
        user_id: UserId,
        categories: Vec<NewCategory>,
    ) -> Result<Vec<Category>, PortError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let mut created: Vec<Category> = Vec::with_capacity(categories.len());

        for category in categories {
            let taken = state
                .categories
                .iter()
                .chain(created.iter())
                .any(|c| c.user_id == user_id && c.name == category.name);
            if taken {
                return Err(PortError::conflict(format!(
                    "category '{}' already exists",
                    category.name
                )));
            }
            created.push(Category {
                id: CategoryId::new_v7(),
                user_id,
                name: category.name,
                color: category.color,
                icon: category.icon,
                category_type: category.category_type,
                created_at: now,
                updated_at: now,
            });
        }

        state.categories.extend(created.iter().cloned());
        Ok(created)
    }

    async fn delete_category(&self, user_id: UserId, id: CategoryId) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        remove_owned(&mut state.categories, "Category", id, |c| c.id == id && c.user_id == user_id)?;

        let orphaned = Some(id);
        for expense in state.expenses.iter_mut().filter(|e| e.category_id == orphaned) {
            expense.category_id = None;
        }
        for fixed in state.fixed_expenses.iter_mut().filter(|f| f.category_id == orphaned) {
            fixed.category_id = None;
        }
        for purchase in state.purchases.iter_mut().filter(|p| p.category_id == orphaned) {
            purchase.category_id = None;
        }
        Ok(())
    }

    async fn list_expenses(&self, user_id: UserId, filter: ExpenseFilter) -> Result<Vec<Expense>, PortError> {
        let state = self.state.read().await;
        let mut expenses: Vec<Expense> = state
            .expenses
            .iter()
            .filter(|e| e.user_id == user_id && filter.matches(e))
            .cloned()
            .collect();
        newest_first(&mut expenses, |e| (e.date, e.created_at));
        truncate_to(&mut expenses, filter.limit);
        Ok(expenses)
    }

    async fn get_expense(&self, user_id: UserId, id: ExpenseId) -> Result<Expense, PortError> {
        let state = self.state.read().await;
        state
            .expenses
            .iter()
            .find(|e| e.id == id && e.user_id == user_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Expense", id))
    }

    async fn create_expense(&self, user_id: UserId, expense: NewExpense) -> Result<Expense, PortError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let expense = Expense {
            id: ExpenseId::new_v7(),
            user_id,
            category_id: expense.category_id,
            name: expense.name,
            description: expense.description,
            amount: expense.amount,
            date: expense.date,
            expense_type: expense.expense_type,
            created_at: now,
            updated_at: now,
        };
        state.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn update_expense(
        &self,
        user_id: UserId,
        id: ExpenseId,
        expense: NewExpense,
    ) -> Result<Expense, PortError> {
        let mut state = self.state.write().await;
        let stored = find_owned(&mut state.expenses, "Expense", id, |e| e.id == id && e.user_id == user_id)?;
        stored.category_id = expense.category_id;
        stored.name = expense.name;
        stored.description = expense.description;
        stored.amount = expense.amount;
        stored.date = expense.date;
        stored.expense_type = expense.expense_type;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_expense(&self, user_id: UserId, id: ExpenseId) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        remove_owned(&mut state.expenses, "Expense", id, |e| e.id == id && e.user_id == user_id)?;
        Ok(())
    }

    async fn list_incomes(&self, user_id: UserId, filter: IncomeFilter) -> Result<Vec<Income>, PortError> {
        let state = self.state.read().await;
        let mut incomes: Vec<Income> = state
            .incomes
            .iter()
            .filter(|i| i.user_id == user_id && filter.matches(i))
            .cloned()
            .collect();
        newest_first(&mut incomes, |i| (i.date, i.created_at));
        truncate_to(&mut incomes, filter.limit);
        Ok(incomes)
    }

    async fn get_income(&self, user_id: UserId, id: IncomeId) -> Result<Income, PortError> {
        let state = self.state.read().await;
        state
            .incomes
            .iter()
            .find(|i| i.id == id && i.user_id == user_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Income", id))
    }

    async fn create_income(&self, user_id: UserId, income: NewIncome) -> Result<Income, PortError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let income = Income {
            id: IncomeId::new_v7(),
            user_id,
            name: income.name,
            description: income.description,
            amount: income.amount,
            date: income.date,
            income_type: income.income_type,
            is_recurring: income.is_recurring,
            created_at: now,
            updated_at: now,
        };
        state.incomes.push(income.clone());
        Ok(income)
    }

    async fn update_income(&self, user_id: UserId, id: IncomeId, income: NewIncome) -> Result<Income, PortError> {
        let mut state = self.state.write().await;
        let stored = find_owned(&mut state.incomes, "Income", id, |i| i.id == id && i.user_id == user_id)?;
        stored.name = income.name;
        stored.description = income.description;
        stored.amount = income.amount;
        stored.date = income.date;
        stored.income_type = income.income_type;
        stored.is_recurring = income.is_recurring;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_income(&self, user_id: UserId, id: IncomeId) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        remove_owned(&mut state.incomes, "Income", id, |i| i.id == id && i.user_id == user_id)?;
        Ok(())
    }

    async fn list_fixed_expenses(&self, user_id: UserId) -> Result<Vec<FixedExpense>, PortError> {
        let state = self.state.read().await;
        let mut fixed: Vec<FixedExpense> = state
            .fixed_expenses
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        fixed.sort_by(|a, b| a.due_day.cmp(&b.due_day).then_with(|| a.name.cmp(&b.name)));
        Ok(fixed)
    }

    async fn get_fixed_expense(&self, user_id: UserId, id: FixedExpenseId) -> Result<FixedExpense, PortError> {
        let state = self.state.read().await;
        state
            .fixed_expenses
            .iter()
            .find(|f| f.id == id && f.user_id == user_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("FixedExpense", id))
    }

    async fn create_fixed_expense(
        &self,
        user_id: UserId,
        expense: NewFixedExpense,
    ) -> Result<FixedExpense, PortError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let fixed = FixedExpense {
            id: FixedExpenseId::new_v7(),
            user_id,
            category_id: expense.category_id,
            name: expense.name,
            description: expense.description,
            amount: expense.amount,
            due_day: expense.due_day,
            frequency: expense.frequency,
            is_active: expense.is_active,
            last_paid_at: None,
            created_at: now,
            updated_at: now,
        };
        state.fixed_expenses.push(fixed.clone());
        Ok(fixed)
    }

    async fn update_fixed_expense(
        &self,
        user_id: UserId,
        id: FixedExpenseId,
        expense: NewFixedExpense,
    ) -> Result<FixedExpense, PortError> {
        let mut state = self.state.write().await;
        let stored = find_owned(&mut state.fixed_expenses, "FixedExpense", id, |f| {
            f.id == id && f.user_id == user_id
        })?;
        stored.category_id = expense.category_id;
        stored.name = expense.name;
        stored.description = expense.description;
        stored.amount = expense.amount;
        stored.due_day = expense.due_day;
        stored.frequency = expense.frequency;
        stored.is_active = expense.is_active;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn mark_fixed_expense_paid(
        &self,
        user_id: UserId,
        id: FixedExpenseId,
        paid: bool,
    ) -> Result<FixedExpense, PortError> {
        let mut state = self.state.write().await;
        let stored = find_owned(&mut state.fixed_expenses, "FixedExpense", id, |f| {
            f.id == id && f.user_id == user_id
        })?;
        let now = Utc::now();
        stored.last_paid_at = paid.then_some(now);
        stored.updated_at = now;
        Ok(stored.clone())
    }

    async fn delete_fixed_expense(&self, user_id: UserId, id: FixedExpenseId) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        remove_owned(&mut state.fixed_expenses, "FixedExpense", id, |f| {
            f.id == id && f.user_id == user_id
        })?;
        Ok(())
    }
}

#[async_trait]
impl CreditCardPort for InMemoryFinanceStore {
    async fn list_cards(&self, user_id: UserId) -> Result<Vec<CreditCard>, PortError> {
        let state = self.state.read().await;
        let mut cards: Vec<CreditCard> = state
            .cards
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        cards.sort_by_key(|c| Reverse(c.created_at));
        Ok(cards)
    }

    async fn get_card(&self, user_id: UserId, id: CreditCardId) -> Result<CreditCard, PortError> {
        let state = self.state.read().await;
        state
            .cards
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("CreditCard", id))
    }

    async fn create_card(&self, user_id: UserId, card: NewCreditCard) -> Result<CreditCard, PortError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let card = CreditCard {
            id: CreditCardId::new_v7(),
            user_id,
            name: card.name,
            last_digits: card.last_digits,
            brand: card.brand,
            limit: card.limit,
            closing_day: card.closing_day,
            due_day: card.due_day,
            color: card.color,
            is_active: card.is_active,
            created_at: now,
            updated_at: now,
        };
        state.cards.push(card.clone());
        Ok(card)
    }

    async fn update_card(
        &self,
        user_id: UserId,
        id: CreditCardId,
        card: NewCreditCard,
    ) -> Result<CreditCard, PortError> {
        let mut state = self.state.write().await;
        let stored = find_owned(&mut state.cards, "CreditCard", id, |c| c.id == id && c.user_id == user_id)?;
        stored.name = card.name;
        stored.last_digits = card.last_digits;
        stored.brand = card.brand;
        stored.limit = card.limit;
        stored.closing_day = card.closing_day;
        stored.due_day = card.due_day;
        stored.color = card.color;
        stored.is_active = card.is_active;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_card(&self, user_id: UserId, id: CreditCardId) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        remove_owned(&mut state.cards, "CreditCard", id, |c| c.id == id && c.user_id == user_id)?;
        state.purchases.retain(|p| p.credit_card_id != id);
        Ok(())
    }

    async fn list_purchases(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
    ) -> Result<Vec<CardPurchase>, PortError> {
        self.get_card(user_id, card_id).await?;
        let state = self.state.read().await;
        let mut purchases: Vec<CardPurchase> = state
            .purchases
            .iter()
            .filter(|p| p.credit_card_id == card_id && p.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut purchases, |p| (p.purchase_date, p.created_at));
        Ok(purchases)
    }

    async fn create_purchase(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
        purchase: NewCardPurchase,
    ) -> Result<CardPurchase, PortError> {
        let mut state = self.state.write().await;
        if !state.cards.iter().any(|c| c.id == card_id && c.user_id == user_id) {
            return Err(PortError::not_found("CreditCard", card_id));
        }
        let now = Utc::now();
        let purchase = CardPurchase {
            id: CardPurchaseId::new_v7(),
            user_id,
            credit_card_id: card_id,
            category_id: purchase.category_id,
            name: purchase.name,
            description: purchase.description,
            total_amount: purchase.total_amount,
            installments: purchase.installments,
            purchase_date: purchase.purchase_date,
            created_at: now,
            updated_at: now,
        };
        state.purchases.push(purchase.clone());
        Ok(purchase)
    }

    async fn update_purchase(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
        id: CardPurchaseId,
        purchase: NewCardPurchase,
    ) -> Result<CardPurchase, PortError> {
        let mut state = self.state.write().await;
        let stored = find_owned(&mut state.purchases, "CardPurchase", id, |p| {
            p.id == id && p.user_id == user_id && p.credit_card_id == card_id
        })?;
        stored.category_id = purchase.category_id;
        stored.name = purchase.name;
        stored.description = purchase.description;
        stored.total_amount = purchase.total_amount;
        stored.installments = purchase.installments;
        stored.purchase_date = purchase.purchase_date;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_purchase(
        &self,
        user_id: UserId,
        card_id: CreditCardId,
        id: CardPurchaseId,
    ) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        remove_owned(&mut state.purchases, "CardPurchase", id, |p| {
            p.id == id && p.user_id == user_id && p.credit_card_id == card_id
        })?;
        Ok(())
    }
}

#[async_trait]
impl InvestmentPort for InMemoryFinanceStore {
    async fn list_goals(&self, user_id: UserId) -> Result<Vec<Goal>, PortError> {
        let state = self.state.read().await;
        let mut goals: Vec<Goal> = state
            .goals
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        goals.sort_by(goal_ordering);
        Ok(goals)
    }

    async fn get_goal(&self, user_id: UserId, id: GoalId) -> Result<Goal, PortError> {
        let state = self.state.read().await;
        state
            .goals
            .iter()
            .find(|g| g.id == id && g.user_id == user_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Goal", id))
    }

    async fn create_goal(&self, user_id: UserId, goal: NewGoal) -> Result<Goal, PortError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let goal = Goal {
            id: GoalId::new_v7(),
            user_id,
            is_completed: goal.is_completed(),
            name: goal.name,
            description: goal.description,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            deadline: goal.deadline,
            priority: goal.priority,
            created_at: now,
            updated_at: now,
        };
        state.goals.push(goal.clone());
        Ok(goal)
    }

    async fn update_goal(&self, user_id: UserId, id: GoalId, goal: NewGoal) -> Result<Goal, PortError> {
        let mut state = self.state.write().await;
        let stored = find_owned(&mut state.goals, "Goal", id, |g| g.id == id && g.user_id == user_id)?;
        stored.is_completed = goal.is_completed();
        stored.name = goal.name;
        stored.description = goal.description;
        stored.target_amount = goal.target_amount;
        stored.current_amount = goal.current_amount;
        stored.deadline = goal.deadline;
        stored.priority = goal.priority;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_goal(&self, user_id: UserId, id: GoalId) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        remove_owned(&mut state.goals, "Goal", id, |g| g.id == id && g.user_id == user_id)?;
        Ok(())
    }

    async fn upcoming_goals(&self, user_id: UserId, limit: u32) -> Result<Vec<Goal>, PortError> {
        let state = self.state.read().await;
        let mut goals: Vec<Goal> = state
            .goals
            .iter()
            .filter(|g| g.user_id == user_id && !g.is_completed)
            .cloned()
            .collect();
        goals.sort_by_key(|g| g.deadline);
        goals.truncate(limit as usize);
        Ok(goals)
    }

    async fn list_simulations(&self, user_id: UserId) -> Result<Vec<Simulation>, PortError> {
        let state = self.state.read().await;
        let mut simulations: Vec<Simulation> = state
            .simulations
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        simulations.sort_by_key(|s| Reverse(s.created_at));
        Ok(simulations)
    }

    async fn create_simulation(
        &self,
        user_id: UserId,
        simulation: NewSimulation,
    ) -> Result<Simulation, PortError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        let simulation = Simulation {
            id: SimulationId::new_v7(),
            user_id,
            name: simulation.name,
            initial_amount: simulation.initial_amount,
            monthly_contribution: simulation.monthly_contribution,
            interest_rate: simulation.interest_rate,
            interest_type: simulation.interest_type,
            period_months: simulation.period_months,
            projected_amount: Some(simulation.projected_amount),
            created_at: now,
            updated_at: now,
        };
        state.simulations.push(simulation.clone());
        Ok(simulation)
    }

    async fn delete_simulation(&self, user_id: UserId, id: SimulationId) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        remove_owned(&mut state.simulations, "Simulation", id, |s| s.id == id && s.user_id == user_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain_budget::ExpenseType;
    use rust_decimal_macros::dec;

    fn lunch(category_id: Option<CategoryId>) -> NewExpense {
        NewExpense {
            name: "Almoço".to_string(),
            description: None,
            amount: dec!(42.50),
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            expense_type: ExpenseType::Variable,
            category_id,
        }
    }

    #[tokio::test]
    async fn test_records_are_scoped_by_user() {
        let store = InMemoryFinanceStore::new();
        let owner = UserId::new();
        let other = UserId::new();

        let expense = store.create_expense(owner, lunch(None)).await.unwrap();
        let err = store.get_expense(other, expense.id).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.delete_expense(other, expense.id).await.is_err());
        assert!(store.get_expense(owner, expense.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_deleting_category_uncategorizes_expenses() {
        let store = InMemoryFinanceStore::new();
        let user = UserId::new();
        let food = store
            .create_category(user, NewCategory::expense("Alimentação", "#ef4444"))
            .await
            .unwrap();
        let expense = store.create_expense(user, lunch(Some(food.id))).await.unwrap();

        store.delete_category(user, food.id).await.unwrap();

        let expense = store.get_expense(user, expense.id).await.unwrap();
        assert_eq!(expense.category_id, None);
    }

    #[tokio::test]
    async fn test_duplicate_category_name_conflicts() {
        let store = InMemoryFinanceStore::new();
        let user = UserId::new();
        store
            .create_category(user, NewCategory::expense("Lazer", "#ec4899"))
            .await
            .unwrap();

        let err = store
            .create_category(user, NewCategory::expense("Lazer", "#000000"))
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Conflict { .. }));

        // Names are only unique per user
        assert!(store
            .create_category(UserId::new(), NewCategory::expense("Lazer", "#ec4899"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_used_token_cannot_reset_twice() {
        let store = InMemoryUserStore::new();
        let user = store
            .create_user(NewUser {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let token = store
            .create_reset_token(user.id, NewResetToken::generate(Utc::now()))
            .await
            .unwrap();

        store.reset_password(token.id, user.id, "new".to_string()).await.unwrap();
        let err = store
            .reset_password(token.id, user.id, "again".to_string())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.get_user(user.id).await.unwrap().password_hash, "new");
    }
}
