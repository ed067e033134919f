//! Investment Domain Ports
//!
//! Storage operations for goals and saved simulations, scoped by user.

use async_trait::async_trait;

use core_kernel::{DomainPort, GoalId, PortError, SimulationId, UserId};

use crate::goal::{Goal, NewGoal};
use crate::simulation::{NewSimulation, Simulation};

/// Storage operations for the investment domain
#[async_trait]
pub trait InvestmentPort: DomainPort {
    // ========================================================================
    // Goals
    // ========================================================================

    /// Lists the user's goals in [`crate::goal::goal_ordering`] order
    async fn list_goals(&self, user_id: UserId) -> Result<Vec<Goal>, PortError>;

    /// Retrieves one goal
    ///
    /// # Returns
    ///
    /// The goal if it exists and belongs to `user_id`, or `PortError::NotFound`
    async fn get_goal(&self, user_id: UserId, id: GoalId) -> Result<Goal, PortError>;

    /// Creates a goal; `is_completed` is derived from the amounts
    async fn create_goal(&self, user_id: UserId, goal: NewGoal) -> Result<Goal, PortError>;

    /// Replaces a goal; `is_completed` is derived from the amounts
    async fn update_goal(&self, user_id: UserId, id: GoalId, goal: NewGoal) -> Result<Goal, PortError>;

    async fn delete_goal(&self, user_id: UserId, id: GoalId) -> Result<(), PortError>;

    /// Incomplete goals with the nearest deadlines first
    async fn upcoming_goals(&self, user_id: UserId, limit: u32) -> Result<Vec<Goal>, PortError>;

    // ========================================================================
    // Simulations
    // ========================================================================

    /// Lists the user's saved simulations, newest first
    async fn list_simulations(&self, user_id: UserId) -> Result<Vec<Simulation>, PortError>;

    async fn create_simulation(
        &self,
        user_id: UserId,
        simulation: NewSimulation,
    ) -> Result<Simulation, PortError>;

    async fn delete_simulation(&self, user_id: UserId, id: SimulationId) -> Result<(), PortError>;
}
