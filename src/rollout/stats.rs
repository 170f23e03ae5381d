//! Terminal statistics of a single episode.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::env::AgentView;
use crate::results::{Cell, Record};

/// Column names used by [`EpisodeStats::to_record`].
pub mod keys {
    pub const TOTAL_REWARD: &str = "total_reward";
    pub const STEPS: &str = "steps";
    pub const NUM_AGENTS: &str = "num_agents";
    pub const TIME_TO_GOAL: &str = "time_to_goal";
    pub const TOTAL_TIME_TO_GOAL: &str = "total_time_to_goal";
    pub const EXTRA_TIME_TO_GOAL: &str = "extra_time_to_goal";
    pub const PCT_COLLISIONS: &str = "% collisions";
    pub const PCT_AT_GOAL: &str = "% at_goal";
    pub const PCT_STUCK: &str = "% stuck";
    pub const OUTCOME: &str = "outcome";
    pub const POLICIES: &str = "policies";
}

/// Terminal state of one agent.
///
/// Priority: collision, then at goal, then stuck. An agent that is both in
/// collision and at its goal counts as a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentOutcome {
    Collision,
    AtGoal,
    Stuck,
}

impl AgentOutcome {
    pub fn classify<A: AgentView + ?Sized>(agent: &A) -> Self {
        if agent.in_collision() {
            AgentOutcome::Collision
        } else if agent.is_at_goal() {
            AgentOutcome::AtGoal
        } else {
            AgentOutcome::Stuck
        }
    }
}

/// What happened to the episode as a whole.
///
/// `Collision` if any agent collided, else `AllAtGoal` if every agent
/// reached its goal, else `Stuck`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Collision,
    AllAtGoal,
    Stuck,
}

impl Outcome {
    /// Classifies an agent population. An empty population is `AllAtGoal`.
    pub fn classify<A: AgentView>(agents: &[A]) -> Self {
        if agents.iter().any(|a| a.in_collision()) {
            Outcome::Collision
        } else if agents.iter().all(|a| a.is_at_goal()) {
            Outcome::AllAtGoal
        } else {
            Outcome::Stuck
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Collision => "collision",
            Outcome::AllAtGoal => "all_at_goal",
            Outcome::Stuck => "stuck",
        }
    }

    pub fn all() -> [Outcome; 3] {
        [Outcome::Collision, Outcome::AllAtGoal, Outcome::Stuck]
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary metrics of one completed episode.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpisodeStats {
    /// Return of each agent: its reward summed over all steps, in agent order.
    pub total_reward: Vec<f64>,
    /// Number of ticks executed.
    pub steps: u32,
    pub num_agents: usize,
    /// Elapsed simulated time per agent.
    pub time_to_goal: Vec<f64>,
    pub total_time_to_goal: f64,
    /// Elapsed time minus straight-line time, per agent. Not clamped.
    pub extra_time_to_goal: Vec<f64>,
    pub pct_collisions: f64,
    pub pct_at_goal: f64,
    pub pct_stuck: f64,
    pub outcome: Outcome,
    /// Policy identifier of every agent, in agent order.
    pub policies: Vec<String>,
}

impl EpisodeStats {
    /// Computes the statistics from the terminal agent states.
    ///
    /// `total_reward` holds the per-agent returns. For an empty population
    /// the percentages are all zero.
    pub fn from_agents<A: AgentView>(agents: &[A], total_reward: Vec<f64>, steps: u32) -> Self {
        let time_to_goal: Vec<f64> = agents.iter().map(|a| a.elapsed_time()).collect();
        let extra_time_to_goal = agents
            .iter()
            .map(|a| a.elapsed_time() - a.straight_line_time_to_goal())
            .collect();

        let (mut collisions, mut at_goal, mut stuck) = (0usize, 0usize, 0usize);
        for agent in agents {
            match AgentOutcome::classify(agent) {
                AgentOutcome::Collision => collisions += 1,
                AgentOutcome::AtGoal => at_goal += 1,
                AgentOutcome::Stuck => stuck += 1,
            }
        }
        let n = agents.len();
        let pct = |count: usize| if n == 0 { 0.0 } else { count as f64 / n as f64 };

        Self {
            total_reward,
            steps,
            num_agents: n,
            total_time_to_goal: time_to_goal.iter().sum(),
            time_to_goal,
            extra_time_to_goal,
            pct_collisions: pct(collisions),
            pct_at_goal: pct(at_goal),
            pct_stuck: pct(stuck),
            outcome: Outcome::classify(agents),
            policies: agents.iter().map(|a| a.policy_id().to_string()).collect(),
        }
    }

    /// Sum of all agents' returns.
    pub fn reward_sum(&self) -> f64 {
        self.total_reward.iter().sum()
    }

    /// Flattens the statistics into a results-table record.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(keys::TOTAL_REWARD, Cell::FloatList(self.total_reward.clone()));
        record.insert(keys::STEPS, Cell::Int(i64::from(self.steps)));
        record.insert(keys::NUM_AGENTS, Cell::Int(self.num_agents as i64));
        record.insert(keys::TIME_TO_GOAL, Cell::FloatList(self.time_to_goal.clone()));
        record.insert(keys::TOTAL_TIME_TO_GOAL, Cell::Float(self.total_time_to_goal));
        record.insert(
            keys::EXTRA_TIME_TO_GOAL,
            Cell::FloatList(self.extra_time_to_goal.clone()),
        );
        record.insert(keys::PCT_COLLISIONS, Cell::Float(self.pct_collisions));
        record.insert(keys::PCT_AT_GOAL, Cell::Float(self.pct_at_goal));
        record.insert(keys::PCT_STUCK, Cell::Float(self.pct_stuck));
        record.insert(keys::OUTCOME, Cell::Text(self.outcome.to_string()));
        record.insert(keys::POLICIES, Cell::TextList(self.policies.clone()));
        record
    }
}

impl fmt::Display for EpisodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Episode ({} agents, {} steps): {} ===",
            self.num_agents, self.steps, self.outcome
        )?;
        writeln!(f, "  Total reward:        {:.3}", self.reward_sum())?;
        writeln!(f, "  Total time to goal:  {:.2}", self.total_time_to_goal)?;
        writeln!(
            f,
            "  Collisions / at goal / stuck: {:.1}% / {:.1}% / {:.1}%",
            self.pct_collisions * 100.0,
            self.pct_at_goal * 100.0,
            self.pct_stuck * 100.0
        )?;
        writeln!(f, "  Policies:            {}", self.policies.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Position, ScriptedAgent};

    fn agent(in_collision: bool, is_at_goal: bool) -> ScriptedAgent {
        let mut a = ScriptedAgent::new(0, Position::new(0.0, 0.0), Position::new(2.0, 0.0));
        a.in_collision = in_collision;
        a.is_at_goal = is_at_goal;
        a
    }

    #[test]
    fn collision_takes_priority_over_goal() {
        assert_eq!(AgentOutcome::classify(&agent(true, true)), AgentOutcome::Collision);
        assert_eq!(AgentOutcome::classify(&agent(false, true)), AgentOutcome::AtGoal);
        assert_eq!(AgentOutcome::classify(&agent(false, false)), AgentOutcome::Stuck);
    }

    #[test]
    fn any_collision_makes_collision_outcome() {
        let agents = vec![agent(false, true), agent(true, false), agent(false, false)];
        assert_eq!(Outcome::classify(&agents), Outcome::Collision);
    }

    #[test]
    fn partial_arrival_is_stuck() {
        let agents = vec![agent(false, true), agent(false, false)];
        assert_eq!(Outcome::classify(&agents), Outcome::Stuck);
    }

    #[test]
    fn all_at_goal_outcome() {
        let agents = vec![agent(false, true), agent(false, true)];
        assert_eq!(Outcome::classify(&agents), Outcome::AllAtGoal);
    }

    #[test]
    fn percentages_sum_to_one() {
        let agents = vec![
            agent(true, true),
            agent(false, true),
            agent(false, false),
            agent(false, false),
        ];
        let stats = EpisodeStats::from_agents(&agents, vec![0.0; 4], 1);
        assert_eq!(stats.pct_collisions, 0.25);
        assert_eq!(stats.pct_at_goal, 0.25);
        assert_eq!(stats.pct_stuck, 0.5);
        let sum = stats.pct_collisions + stats.pct_at_goal + stats.pct_stuck;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn extra_time_is_not_clamped() {
        let mut a = agent(false, true);
        a.t = 1.0; // straight-line time is 2.0 at pref_speed 1.0
        let stats = EpisodeStats::from_agents(&[a], vec![1.0], 10);
        assert_eq!(stats.time_to_goal, vec![1.0]);
        assert_eq!(stats.extra_time_to_goal, vec![-1.0]);
        assert_eq!(stats.total_time_to_goal, 1.0);
    }

    #[test]
    fn empty_population() {
        let stats = EpisodeStats::from_agents::<ScriptedAgent>(&[], vec![], 3);
        assert_eq!(stats.num_agents, 0);
        assert_eq!(stats.pct_collisions + stats.pct_at_goal + stats.pct_stuck, 0.0);
        assert_eq!(stats.outcome, Outcome::AllAtGoal);
    }

    #[test]
    fn record_has_expected_keys_in_order() {
        let stats = EpisodeStats::from_agents(&[agent(false, true)], vec![1.0], 4);
        let record = stats.to_record();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(
            keys,
            vec![
                "total_reward",
                "steps",
                "num_agents",
                "time_to_goal",
                "total_time_to_goal",
                "extra_time_to_goal",
                "% collisions",
                "% at_goal",
                "% stuck",
                "outcome",
                "policies",
            ]
        );
        assert_eq!(record.get("outcome"), Some(&Cell::Text("all_at_goal".into())));
        assert_eq!(record.get("steps"), Some(&Cell::Int(4)));
        assert_eq!(record.get("total_reward"), Some(&Cell::FloatList(vec![1.0])));
    }

    #[test]
    fn per_agent_returns_are_kept() {
        let agents = vec![agent(false, true), agent(true, false)];
        let stats = EpisodeStats::from_agents(&agents, vec![1.0, -0.25], 6);
        assert_eq!(stats.total_reward, vec![1.0, -0.25]);
        assert!((stats.reward_sum() - 0.75).abs() < 1e-12);
        assert_eq!(
            stats.to_record().get("total_reward"),
            Some(&Cell::FloatList(vec![1.0, -0.25]))
        );
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Collision.to_string(), "collision");
        assert_eq!(Outcome::AllAtGoal.to_string(), "all_at_goal");
        assert_eq!(Outcome::Stuck.to_string(), "stuck");
    }
}
