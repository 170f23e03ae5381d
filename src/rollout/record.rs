//! Per-step recording and the episode-end reshaping of recorded data.
//!
//! Data is accumulated step-major (one entry per step holding every agent)
//! and converted once at episode end:
//!
//! - the dataset record is transposed to agent-major order, so that
//!   `record.states[j][i]` is agent `j` at step `i`;
//! - the offline-RL record is stacked into dense arrays with a leading step
//!   axis.

use ndarray::{stack, Array1, ArrayD, ArrayView, Axis, IxDyn, ShapeError};
use tracing::warn;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::config::RolloutConfig;
use crate::env::{AgentAction, AgentView, ObservationTensor, Pose, Position};

/// Per-agent trajectory data of one episode (dataset-generation mode).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EpisodeRecord {
    /// Number of recorded steps.
    pub steps: u32,
    pub radii: Vec<f64>,
    /// `states[agent][step]`.
    pub states: Vec<Vec<Pose>>,
    /// `actions[agent][step]`.
    pub actions: Vec<Vec<AgentAction>>,
    /// `rewards[agent][step]`.
    pub rewards: Vec<Vec<f64>>,
    /// Terminal flag of each step.
    pub terminals: Vec<bool>,
    /// Timeout flag of each step.
    pub timeouts: Vec<bool>,
    pub goals: Vec<Position>,
    pub policies: Vec<String>,
}

impl EpisodeRecord {
    pub fn num_agents(&self) -> usize {
        self.states.len()
    }
}

/// Dense arrays of one episode for offline RL.
///
/// Shapes: `observations [steps, ..obs]`, `actions [steps, agents, 2]`,
/// `rewards [steps, agents]`, `terminals [steps]`, `timeouts [steps]`.
/// Flags are stored as `0.0` / `1.0`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OfflineRlRecord {
    pub observations: ArrayD<f64>,
    pub actions: ArrayD<f64>,
    pub rewards: ArrayD<f64>,
    pub terminals: ArrayD<f64>,
    pub timeouts: ArrayD<f64>,
}

impl OfflineRlRecord {
    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct DatasetBuffer {
    radii: Vec<f64>,
    goals: Vec<Position>,
    policies: Vec<String>,
    states: Vec<Vec<Pose>>,
    actions: Vec<Vec<AgentAction>>,
    rewards: Vec<Vec<f64>>,
    terminals: Vec<bool>,
    timeouts: Vec<bool>,
}

#[derive(Debug, Default)]
struct OfflineBuffer {
    observations: Vec<ArrayD<f64>>,
    actions: Vec<Vec<AgentAction>>,
    rewards: Vec<Vec<f64>>,
    terminals: Vec<bool>,
    timeouts: Vec<bool>,
}

/// Flags of one recorded step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepFlags {
    /// 1-based index of the step.
    pub step: u32,
    pub terminated: bool,
    pub timeout: bool,
}

/// Accumulates the side-channel records enabled in a [`RolloutConfig`].
#[derive(Debug, Default)]
pub struct StepRecorder {
    dataset: Option<DatasetBuffer>,
    offline: Option<OfflineBuffer>,
}

impl StepRecorder {
    pub fn new(config: &RolloutConfig) -> Self {
        Self {
            dataset: config.generate_dataset.then(DatasetBuffer::default),
            offline: config.record_offline_rl.then(OfflineBuffer::default),
        }
    }

    /// Whether any record is being built.
    pub fn is_active(&self) -> bool {
        self.dataset.is_some() || self.offline.is_some()
    }

    /// Records one step.
    ///
    /// Static agent attributes (radius, goal, policy) are captured on the
    /// first step only.
    pub fn record<A, O>(&mut self, flags: StepFlags, agents: &[A], observation: &O, rewards: &[f64])
    where
        A: AgentView,
        O: ObservationTensor + ?Sized,
    {
        let agent_rewards = per_agent_rewards(rewards, agents.len());
        let actions: Vec<AgentAction> = agents.iter().map(AgentView::latest_action).collect();

        if let Some(buf) = self.dataset.as_mut() {
            if flags.step == 1 {
                buf.radii = agents.iter().map(AgentView::radius).collect();
                buf.goals = agents.iter().map(AgentView::goal).collect();
                buf.policies = agents.iter().map(|a| a.policy_id().to_string()).collect();
            }
            buf.states.push(agents.iter().map(AgentView::pose).collect());
            buf.actions.push(actions.clone());
            buf.rewards.push(agent_rewards.clone());
            buf.terminals.push(flags.terminated);
            buf.timeouts.push(flags.timeout);
        }

        if let Some(buf) = self.offline.as_mut() {
            buf.observations.push(observation.to_array());
            buf.actions.push(actions);
            buf.rewards.push(agent_rewards);
            buf.terminals.push(flags.terminated);
            buf.timeouts.push(flags.timeout);
        }
    }

    /// Finalizes the enabled records.
    pub fn finish(
        self,
        num_agents: usize,
    ) -> Result<(Option<EpisodeRecord>, Option<OfflineRlRecord>), ShapeError> {
        let dataset = self.dataset.map(|buf| buf.finish(num_agents));
        let offline = self.offline.map(|buf| buf.finish(num_agents)).transpose()?;
        Ok((dataset, offline))
    }
}

impl DatasetBuffer {
    fn finish(self, num_agents: usize) -> EpisodeRecord {
        EpisodeRecord {
            steps: self.terminals.len() as u32,
            radii: self.radii,
            states: agent_major(self.states, num_agents),
            actions: agent_major(self.actions, num_agents),
            rewards: agent_major(self.rewards, num_agents),
            terminals: self.terminals,
            timeouts: self.timeouts,
            goals: self.goals,
            policies: self.policies,
        }
    }
}

impl OfflineBuffer {
    fn finish(self, num_agents: usize) -> Result<OfflineRlRecord, ShapeError> {
        let steps = self.terminals.len();

        let observations = if self.observations.is_empty() {
            ArrayD::zeros(IxDyn(&[0]))
        } else {
            let views: Vec<ArrayView<'_, f64, IxDyn>> =
                self.observations.iter().map(|o| o.view()).collect();
            stack(Axis(0), &views)?
        };

        let actions: Vec<f64> = self
            .actions
            .iter()
            .flatten()
            .flat_map(|a| a.as_array())
            .collect();
        let actions = ArrayD::from_shape_vec(IxDyn(&[steps, num_agents, 2]), actions)?;

        let rewards: Vec<f64> = self.rewards.into_iter().flatten().collect();
        let rewards = ArrayD::from_shape_vec(IxDyn(&[steps, num_agents]), rewards)?;

        Ok(OfflineRlRecord {
            observations,
            actions,
            rewards,
            terminals: flags_array(&self.terminals),
            timeouts: flags_array(&self.timeouts),
        })
    }
}

/// Aligns a step's reward vector with the agent population.
///
/// Missing entries read as `0.0` and surplus entries are dropped; either
/// case is logged as a warning.
pub fn per_agent_rewards(rewards: &[f64], num_agents: usize) -> Vec<f64> {
    if rewards.len() != num_agents {
        warn!(
            rewards = rewards.len(),
            agents = num_agents,
            "reward vector does not match agent count"
        );
    }
    (0..num_agents)
        .map(|i| rewards.get(i).copied().unwrap_or(0.0))
        .collect()
}

/// Transposes step-major data (`steps[i][j]`) into agent-major sequences
/// (`out[j][i]`), preserving step order.
pub fn agent_major<T>(steps: Vec<Vec<T>>, num_agents: usize) -> Vec<Vec<T>> {
    let mut out: Vec<Vec<T>> = (0..num_agents)
        .map(|_| Vec::with_capacity(steps.len()))
        .collect();
    for step in steps {
        for (seq, value) in out.iter_mut().zip(step) {
            seq.push(value);
        }
    }
    out
}

fn flags_array(flags: &[bool]) -> ArrayD<f64> {
    Array1::from_iter(flags.iter().map(|&f| if f { 1.0 } else { 0.0 })).into_dyn()
}
