//! Goal and simulation repository

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

#[derive(Debug, Clone, FromRow)]
pub struct GoalRow {
    pub goal_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub priority: i16,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SimulationRow {
    pub simulation_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub initial_amount: Decimal,
    pub monthly_contribution: Decimal,
    pub interest_rate: Decimal,
    pub interest_type: String,
    pub period_months: i32,
    pub projected_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct GoalValues {
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub priority: i16,
    pub is_completed: bool,
}

#[derive(Debug, Clone)]
pub struct SimulationValues {
    pub name: String,
    pub initial_amount: Decimal,
    pub monthly_contribution: Decimal,
    pub interest_rate: Decimal,
    pub interest_type: &'static str,
    pub period_months: i32,
    pub projected_amount: Decimal,
}

const GOAL_COLUMNS: &str = "goal_id, user_id, name, description, target_amount, current_amount, \
     deadline, priority, is_completed, created_at, updated_at";
const SIMULATION_COLUMNS: &str = "simulation_id, user_id, name, initial_amount, monthly_contribution, \
     interest_rate, interest_type, period_months, projected_amount, created_at, updated_at";

/// Repository for investment goals and saved simulations
#[derive(Debug, Clone)]
pub struct InvestmentRepository {
    pool: PgPool,
}

impl InvestmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Goals
    // ========================================================================

    pub async fn list_goals(&self, user_id: Uuid) -> Result<Vec<GoalRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, GoalRow>(&format!(
            r#"
            SELECT {GOAL_COLUMNS} FROM goals
            WHERE user_id = $1
            ORDER BY is_completed ASC, priority DESC, deadline ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Open goals with the nearest deadlines first
    pub async fn upcoming_goals(&self, user_id: Uuid, limit: i64) -> Result<Vec<GoalRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, GoalRow>(&format!(
            r#"
            SELECT {GOAL_COLUMNS} FROM goals
            WHERE user_id = $1 AND is_completed = FALSE
            ORDER BY deadline ASC
            LIMIT $2
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<GoalRow, DatabaseError> {
        sqlx::query_as::<_, GoalRow>(&format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE goal_id = $1 AND user_id = $2"
        ))
        .bind(goal_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Goal", goal_id))
    }

    pub async fn insert_goal(&self, user_id: Uuid, goal_id: Uuid, values: &GoalValues) -> Result<GoalRow, DatabaseError> {
        let row = sqlx::query_as::<_, GoalRow>(&format!(
            r#"
            INSERT INTO goals (goal_id, user_id, name, description, target_amount,
                               current_amount, deadline, priority, is_completed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(goal_id)
        .bind(user_id)
        .bind(&values.name)
        .bind(&values.description)
        .bind(values.target_amount)
        .bind(values.current_amount)
        .bind(values.deadline)
        .bind(values.priority)
        .bind(values.is_completed)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_goal(&self, user_id: Uuid, goal_id: Uuid, values: &GoalValues) -> Result<GoalRow, DatabaseError> {
        sqlx::query_as::<_, GoalRow>(&format!(
            r#"
            UPDATE goals
            SET name = $3, description = $4, target_amount = $5, current_amount = $6,
                deadline = $7, priority = $8, is_completed = $9, updated_at = now()
            WHERE goal_id = $1 AND user_id = $2
            RETURNING {GOAL_COLUMNS}
            "#
        ))
        .bind(goal_id)
        .bind(user_id)
        .bind(&values.name)
        .bind(&values.description)
        .bind(values.target_amount)
        .bind(values.current_amount)
        .bind(values.deadline)
        .bind(values.priority)
        .bind(values.is_completed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Goal", goal_id))
    }

    pub async fn delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM goals WHERE goal_id = $1 AND user_id = $2")
            .bind(goal_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Goal", goal_id));
        }
        Ok(())
    }

    // ========================================================================
    // Simulations
    // ========================================================================

    pub async fn list_simulations(&self, user_id: Uuid) -> Result<Vec<SimulationRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, SimulationRow>(&format!(
            "SELECT {SIMULATION_COLUMNS} FROM simulations WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert_simulation(
        &self,
        user_id: Uuid,
        simulation_id: Uuid,
        values: &SimulationValues,
    ) -> Result<SimulationRow, DatabaseError> {
        let row = sqlx::query_as::<_, SimulationRow>(&format!(
            r#"
            INSERT INTO simulations (simulation_id, user_id, name, initial_amount,
                                     monthly_contribution, interest_rate, interest_type,
                                     period_months, projected_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {SIMULATION_COLUMNS}
            "#
        ))
        .bind(simulation_id)
        .bind(user_id)
        .bind(&values.name)
        .bind(values.initial_amount)
        .bind(values.monthly_contribution)
        .bind(values.interest_rate)
        .bind(values.interest_type)
        .bind(values.period_months)
        .bind(values.projected_amount)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_simulation(&self, user_id: Uuid, simulation_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM simulations WHERE simulation_id = $1 AND user_id = $2")
            .bind(simulation_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Simulation", simulation_id));
        }
        Ok(())
    }
}
