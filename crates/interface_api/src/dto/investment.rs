//! Goal and simulation DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::money::to_f64;
use core_kernel::{GoalId, SimulationId};
use domain_investment::{
    Goal, InterestType, NewGoal, NewSimulation, ProjectionInput, ProjectionPoint, ProjectionSummary,
    Simulation,
};

use super::to_amount;
use crate::error::ApiError;

fn default_priority() -> u8 {
    1
}

// ============================================================================
// Goals
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    #[validate(length(min = 1, max = 100, message = "Nome deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[validate(length(max = 500, message = "Descrição deve ter no máximo 500 caracteres"))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, max = 999_999_999.0, message = "Valor alvo deve ser positivo e no máximo 999.999.999"))]
    pub target_amount: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 999_999_999.0, message = "Valor atual não pode ser negativo"))]
    pub current_amount: f64,
    pub deadline: NaiveDate,
    #[serde(default = "default_priority")]
    #[validate(range(min = 1, max = 5, message = "Prioridade deve ser entre 1 e 5"))]
    pub priority: u8,
}

impl GoalRequest {
    pub fn into_new(self) -> Result<NewGoal, ApiError> {
        let goal = NewGoal {
            name: self.name,
            description: self.description,
            target_amount: to_amount(self.target_amount)?,
            current_amount: to_amount(self.current_amount)?,
            deadline: self.deadline,
            priority: self.priority,
        };
        goal.validate()?;
        Ok(goal)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    pub id: GoalId,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: f64,
    pub current_amount: f64,
    pub remaining_amount: f64,
    pub deadline: NaiveDate,
    pub priority: u8,
    pub is_completed: bool,
    pub progress_percent: i64,
    /// Negative once the deadline has passed
    pub days_left: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GoalResponse {
    pub fn new(goal: Goal, today: NaiveDate) -> Self {
        Self {
            progress_percent: goal.progress_percent(),
            days_left: goal.days_left(today),
            remaining_amount: to_f64(goal.remaining_amount()),
            id: goal.id,
            name: goal.name,
            description: goal.description,
            target_amount: to_f64(goal.target_amount),
            current_amount: to_f64(goal.current_amount),
            deadline: goal.deadline,
            priority: goal.priority,
            is_completed: goal.is_completed,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }
}

// ============================================================================
// Simulations
// ============================================================================

/// Calculator inputs; ranges are checked by [`ProjectionInput::new`]
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    /// Annual rate in percent
    pub interest_rate: f64,
    pub interest_type: InterestType,
    pub period_months: u32,
}

impl ProjectionRequest {
    pub fn input(&self) -> Result<ProjectionInput, ApiError> {
        Ok(ProjectionInput::new(
            self.initial_amount,
            self.monthly_contribution,
            self.interest_rate,
            self.period_months,
            self.interest_type,
        )?)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[validate(length(min = 1, max = 100, message = "Nome deve ter entre 1 e 100 caracteres"))]
    pub name: String,
    #[serde(flatten)]
    pub projection: ProjectionRequest,
}

impl SimulationRequest {
    pub fn into_new(self) -> Result<NewSimulation, ApiError> {
        // Range errors name the offending field before any rounding happens.
        let input = self.projection.input()?;
        let rate = Decimal::from_f64_retain(input.annual_rate_percent)
            .map(|r| r.round_dp(4))
            .ok_or_else(|| ApiError::Validation("Taxa deve ser um número".to_string()))?;

        Ok(NewSimulation::project(
            self.name,
            to_amount(input.initial_amount)?,
            to_amount(input.monthly_contribution)?,
            rate,
            input.interest_type,
            input.period_months,
        )?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub id: SimulationId,
    pub name: String,
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    pub interest_rate: f64,
    pub interest_type: InterestType,
    pub period_months: u32,
    pub projected_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<Simulation> for SimulationResponse {
    fn from(simulation: Simulation) -> Self {
        Self {
            id: simulation.id,
            name: simulation.name,
            initial_amount: to_f64(simulation.initial_amount),
            monthly_contribution: to_f64(simulation.monthly_contribution),
            interest_rate: to_f64(simulation.interest_rate),
            interest_type: simulation.interest_type,
            period_months: simulation.period_months,
            projected_amount: simulation.projected_amount.map(to_f64),
            created_at: simulation.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPointResponse {
    pub month: u32,
    pub total_invested: f64,
    pub total_with_interest: f64,
    pub interest: f64,
}

impl From<ProjectionPoint> for ProjectionPointResponse {
    fn from(point: ProjectionPoint) -> Self {
        Self {
            month: point.month,
            total_invested: point.total_invested,
            total_with_interest: point.total_with_interest,
            interest: point.interest,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummaryResponse {
    pub final_amount: f64,
    pub total_invested: f64,
    pub total_interest: f64,
}

impl From<ProjectionSummary> for ProjectionSummaryResponse {
    fn from(summary: ProjectionSummary) -> Self {
        Self {
            final_amount: summary.final_amount,
            total_invested: summary.total_invested,
            total_interest: summary.total_interest,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub summary: ProjectionSummaryResponse,
    pub series: Vec<ProjectionPointResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_simulation_request_projects_amount() {
        let request: SimulationRequest = serde_json::from_str(
            r#"{"name":"Reserva","initialAmount":1000,"monthlyContribution":500,"interestRate":12,"interestType":"COMPOUND","periodMonths":12}"#,
        )
        .unwrap();
        let simulation = request.into_new().unwrap();
        assert_eq!(simulation.projected_amount, dec!(7468.08));
        assert_eq!(simulation.interest_rate, dec!(12));
    }

    #[test]
    fn test_out_of_range_rate_is_reported() {
        let request = ProjectionRequest {
            initial_amount: 0.0,
            monthly_contribution: 0.0,
            interest_rate: 120.0,
            interest_type: InterestType::Simple,
            period_months: 12,
        };
        assert!(matches!(
            request.input(),
            Err(ApiError::Validation(ref m)) if m == "Taxa deve ser no máximo 100%"
        ));
    }

    #[test]
    fn test_goal_defaults() {
        let request: GoalRequest = serde_json::from_str(
            r#"{"name":"Viagem","targetAmount":5000,"deadline":"2025-12-31"}"#,
        )
        .unwrap();
        assert_eq!(request.priority, 1);
        assert_eq!(request.current_amount, 0.0);
        let goal = request.into_new().unwrap();
        assert!(!goal.is_completed());
    }
}
