//! PostgreSQL Investment Adapter
//!
//! Implements `InvestmentPort` over `InvestmentRepository`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use core_kernel::{DomainPort, GoalId, HealthCheckResult, HealthCheckable, PortError, SimulationId, UserId};
use domain_investment::{Goal, InvestmentPort, NewGoal, NewSimulation, Simulation};

use crate::error::DatabaseError;
use crate::repositories::investment::{
    GoalRow, GoalValues, InvestmentRepository, SimulationRow, SimulationValues,
};

use super::{decode, unsigned};

const ADAPTER_ID: &str = "postgres-investment-adapter";

/// PostgreSQL-backed implementation of `InvestmentPort`
#[derive(Debug, Clone)]
pub struct PostgresInvestmentAdapter {
    repository: InvestmentRepository,
    pool: PgPool,
}

impl PostgresInvestmentAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InvestmentRepository::new(pool.clone()),
            pool,
        }
    }
}

fn goal_from_row(row: GoalRow) -> Result<Goal, DatabaseError> {
    let priority = u8::try_from(row.priority).map_err(|_| DatabaseError::corrupt("priority", row.priority))?;
    Ok(Goal {
        id: GoalId::from_uuid(row.goal_id),
        user_id: UserId::from_uuid(row.user_id),
        name: row.name,
        description: row.description,
        target_amount: row.target_amount,
        current_amount: row.current_amount,
        deadline: row.deadline,
        priority,
        is_completed: row.is_completed,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn simulation_from_row(row: SimulationRow) -> Result<Simulation, DatabaseError> {
    Ok(Simulation {
        id: SimulationId::from_uuid(row.simulation_id),
        user_id: UserId::from_uuid(row.user_id),
        interest_type: decode("interest_type", &row.interest_type)?,
        period_months: unsigned("period_months", row.period_months)?,
        name: row.name,
        initial_amount: row.initial_amount,
        monthly_contribution: row.monthly_contribution,
        interest_rate: row.interest_rate,
        projected_amount: row.projected_amount,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn goal_values(goal: NewGoal) -> GoalValues {
    GoalValues {
        is_completed: goal.is_completed(),
        name: goal.name,
        description: goal.description,
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        deadline: goal.deadline,
        priority: i16::from(goal.priority),
    }
}

fn simulation_values(simulation: NewSimulation) -> SimulationValues {
    SimulationValues {
        name: simulation.name,
        initial_amount: simulation.initial_amount,
        monthly_contribution: simulation.monthly_contribution,
        interest_rate: simulation.interest_rate,
        interest_type: simulation.interest_type.as_str(),
        period_months: simulation.period_months as i32,
        projected_amount: simulation.projected_amount,
    }
}

fn goals_from_rows(rows: Vec<GoalRow>) -> Result<Vec<Goal>, PortError> {
    let goals = rows
        .into_iter()
        .map(goal_from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(goals)
}

impl DomainPort for PostgresInvestmentAdapter {}

#[async_trait]
impl HealthCheckable for PostgresInvestmentAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, ADAPTER_ID).await
    }
}

#[async_trait]
impl InvestmentPort for PostgresInvestmentAdapter {
    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_goals(&self, user_id: UserId) -> Result<Vec<Goal>, PortError> {
        let rows = self.repository.list_goals(user_id.into()).await?;
        debug!(count = rows.len(), "Goals listed");
        goals_from_rows(rows)
    }

    #[instrument(skip(self), fields(user_id = %user_id, goal_id = %id))]
    async fn get_goal(&self, user_id: UserId, id: GoalId) -> Result<Goal, PortError> {
        let row = self.repository.get_goal(user_id.into(), id.into()).await?;
        Ok(goal_from_row(row)?)
    }

    #[instrument(skip(self, goal), fields(user_id = %user_id))]
    async fn create_goal(&self, user_id: UserId, goal: NewGoal) -> Result<Goal, PortError> {
        let id = GoalId::new_v7();
        let row = self
            .repository
            .insert_goal(user_id.into(), id.into(), &goal_values(goal))
            .await?;
        info!(goal_id = %id, "Goal created");
        Ok(goal_from_row(row)?)
    }

    #[instrument(skip(self, goal), fields(user_id = %user_id, goal_id = %id))]
    async fn update_goal(&self, user_id: UserId, id: GoalId, goal: NewGoal) -> Result<Goal, PortError> {
        let row = self
            .repository
            .update_goal(user_id.into(), id.into(), &goal_values(goal))
            .await?;
        info!(completed = row.is_completed, "Goal updated");
        Ok(goal_from_row(row)?)
    }

    #[instrument(skip(self), fields(user_id = %user_id, goal_id = %id))]
    async fn delete_goal(&self, user_id: UserId, id: GoalId) -> Result<(), PortError> {
        self.repository.delete_goal(user_id.into(), id.into()).await?;
        info!("Goal deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn upcoming_goals(&self, user_id: UserId, limit: u32) -> Result<Vec<Goal>, PortError> {
        let rows = self
            .repository
            .upcoming_goals(user_id.into(), i64::from(limit))
            .await?;
        goals_from_rows(rows)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_simulations(&self, user_id: UserId) -> Result<Vec<Simulation>, PortError> {
        let rows = self.repository.list_simulations(user_id.into()).await?;
        debug!(count = rows.len(), "Simulations listed");
        let simulations = rows
            .into_iter()
            .map(simulation_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(simulations)
    }

    #[instrument(skip(self, simulation), fields(user_id = %user_id))]
    async fn create_simulation(
        &self,
        user_id: UserId,
        simulation: NewSimulation,
    ) -> Result<Simulation, PortError> {
        let id = SimulationId::new_v7();
        let row = self
            .repository
            .insert_simulation(user_id.into(), id.into(), &simulation_values(simulation))
            .await?;
        info!(simulation_id = %id, "Simulation saved");
        Ok(simulation_from_row(row)?)
    }

    #[instrument(skip(self), fields(user_id = %user_id, simulation_id = %id))]
    async fn delete_simulation(&self, user_id: UserId, id: SimulationId) -> Result<(), PortError> {
        self.repository.delete_simulation(user_id.into(), id.into()).await?;
        info!("Simulation deleted");
        Ok(())
    }
}
