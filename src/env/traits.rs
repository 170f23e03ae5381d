//! Core environment trait definitions.

use std::collections::BTreeMap;

use ndarray::{Array1, ArrayD};

use super::agent::AgentView;
use super::types::{AgentAction, StateField};

/// Additional information returned from environment steps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepInfo {
    /// Named scalar diagnostics (kept minimal).
    pub extra: Vec<(&'static str, f64)>,
}

impl StepInfo {
    /// Create empty info
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value
    pub fn with_extra(mut self, key: &'static str, value: f64) -> Self {
        self.extra.push((key, value));
        self
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<f64> {
        self.extra.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// Result from a single environment step.
#[derive(Clone, Debug)]
pub struct Transition<O> {
    /// Observation after the step
    pub observation: O,
    /// Reward of each agent, in agent order
    pub rewards: Vec<f64>,
    /// Whether the episode terminated on its own
    pub terminated: bool,
    /// Whether the environment truncated the episode
    pub truncated: bool,
    /// Additional info
    pub info: StepInfo,
}

impl<O> Transition<O> {
    /// Sum of all agents' rewards for this step.
    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().sum()
    }

    /// Replaces the observation, keeping everything else.
    pub fn map_observation<P>(self, f: impl FnOnce(O) -> P) -> Transition<P> {
        Transition {
            observation: f(self.observation),
            rewards: self.rewards,
            terminated: self.terminated,
            truncated: self.truncated,
            info: self.info,
        }
    }
}

/// One agent's raw observation: every exposed state field by name.
pub type AgentObservation = BTreeMap<StateField, Vec<f64>>;

/// Raw dict observation, one entry per agent in agent order.
pub type DictObservation = Vec<AgentObservation>;

/// Observations that can be materialized as a dense numeric array.
pub trait ObservationTensor {
    fn to_array(&self) -> ArrayD<f64>;
}

impl ObservationTensor for DictObservation {
    /// Concatenates every agent's fields (canonical field order) into one vector.
    fn to_array(&self) -> ArrayD<f64> {
        let values: Vec<f64> = self
            .iter()
            .flat_map(|agent| agent.values().flatten().copied())
            .collect();
        Array1::from(values).into_dyn()
    }
}

/// A multi-agent collision-avoidance simulation.
///
/// Each call to [`Environment::step`] advances simulated time by one tick;
/// the per-agent actions are resolved by the agents' own policies, so the
/// `action` argument is a placeholder that callers usually pass as `None`.
///
/// # Example
///
/// ```rust,ignore
/// let mut env = ScriptedEnv::new(agents, 0.1);
/// loop {
///     let t = env.step(None)?;
///     if t.terminated { break; }
/// }
/// env.reset()?;
/// ```
pub trait Environment {
    /// Observation produced by `step` and `reset`.
    type Observation;
    /// Agent type hosted by the environment.
    type Agent: AgentView + Clone;
    /// Failure raised by the underlying simulation.
    type Error: std::error::Error + 'static;

    /// Advance the simulation by one tick.
    fn step(
        &mut self,
        action: Option<&[AgentAction]>,
    ) -> Result<Transition<Self::Observation>, Self::Error>;

    /// Reset the simulation to a fresh episode.
    fn reset(&mut self) -> Result<Self::Observation, Self::Error>;

    /// Agents currently hosted, in agent order.
    fn agents(&self) -> &[Self::Agent];

    /// Number of hosted agents.
    fn num_agents(&self) -> usize {
        self.agents().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_info_lookup() {
        let info = StepInfo::new().with_extra("dt", 0.1);
        assert_eq!(info.get("dt"), Some(0.1));
        assert_eq!(info.get("missing"), None);
    }

    #[test]
    fn transition_total_reward() {
        let t = Transition {
            observation: (),
            rewards: vec![1.0, -0.25, 0.0],
            terminated: false,
            truncated: false,
            info: StepInfo::new(),
        };
        assert!((t.total_reward() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn dict_observation_flattens_in_field_order() {
        let mut a0 = AgentObservation::new();
        a0.insert(StateField::HeadingGlobalFrame, vec![0.5]);
        a0.insert(StateField::PosGlobalFrame, vec![1.0, 2.0]);
        let mut a1 = AgentObservation::new();
        a1.insert(StateField::Radius, vec![0.3]);
        let obs: DictObservation = vec![a0, a1];
        let arr = obs.to_array();
        assert_eq!(arr.shape(), &[4]);
        assert_eq!(arr.iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 0.5, 0.3]);
    }
}
