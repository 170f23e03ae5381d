//! Read-only agent attributes consumed by the runner and observation wrappers.

use super::types::{AgentAction, Pose, Position, StateField};

/// Read-only view of a simulated agent.
///
/// Agents are owned and mutated exclusively by their [`Environment`]; the
/// runner only reads them through this trait.
///
/// [`Environment`]: super::traits::Environment
pub trait AgentView {
    /// Collision radius.
    fn radius(&self) -> f64;

    /// Position in the global frame.
    fn position(&self) -> Position;

    /// Heading in the global frame, radians.
    fn heading(&self) -> f64;

    /// Goal position in the global frame.
    fn goal(&self) -> Position;

    /// Preferred (cruise) speed.
    fn pref_speed(&self) -> f64;

    /// Identifier of the policy driving this agent (e.g. `"GA3C_CADRL"`).
    fn policy_id(&self) -> &str;

    /// Most recent action pair the agent applied (`past_actions[0]`).
    fn latest_action(&self) -> AgentAction;

    /// Simulated time elapsed for this agent.
    fn elapsed_time(&self) -> f64;

    /// Time the agent would need to reach its goal along a straight line
    /// at its preferred speed.
    fn straight_line_time_to_goal(&self) -> f64;

    fn in_collision(&self) -> bool;

    fn is_at_goal(&self) -> bool;

    /// Current pose.
    fn pose(&self) -> Pose {
        Pose::new(self.position(), self.heading())
    }

    /// Distance from the current position to the goal.
    fn dist_to_goal(&self) -> f64 {
        self.position().distance_to(&self.goal())
    }
}

/// Encodes one state field of an agent as its numeric components.
///
/// The returned vector always has [`StateField::size`] elements.
pub fn observe<A: AgentView + ?Sized>(agent: &A, field: StateField) -> Vec<f64> {
    match field {
        StateField::PosGlobalFrame => agent.position().as_array().to_vec(),
        StateField::HeadingGlobalFrame => vec![agent.heading()],
        StateField::GoalGlobalFrame => agent.goal().as_array().to_vec(),
        StateField::Radius => vec![agent.radius()],
        StateField::PrefSpeed => vec![agent.pref_speed()],
        StateField::DistToGoal => vec![agent.dist_to_goal()],
        StateField::HeadingEgoFrame => {
            let bearing = agent.position().bearing_to(&agent.goal());
            vec![wrap_angle(agent.heading() - bearing)]
        }
    }
}

/// Wraps an angle to `[-π, π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}
