//! Episode runner.
//!
//! Steps an environment until it terminates or the step ceiling is reached,
//! then computes the terminal statistics and resets the environment:
//!
//! ```text
//! RUNNING --step--> RUNNING
//! RUNNING --env terminated--> DONE(Terminated)
//! RUNNING --steps == max_episode_length--> DONE(Timeout)
//! ```

use ndarray::ShapeError;
use thiserror::Error;
use tracing::{debug, trace};

use super::config::RolloutConfig;
use super::record::{per_agent_rewards, EpisodeRecord, OfflineRlRecord, StepFlags, StepRecorder};
use super::stats::EpisodeStats;
use crate::env::{ConfigError, Environment, ObservationTensor};
use crate::{generate_id, Id};

/// Why an episode stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The environment reported termination on its own.
    Terminated,
    /// The step ceiling was reached.
    Timeout,
}

/// Everything produced by one episode.
#[derive(Debug, Clone)]
pub struct Episode<A> {
    /// Unique identifier of this episode.
    pub id: Id,
    pub stats: EpisodeStats,
    /// Agents as they were at the end of the episode, before the reset.
    pub agents: Vec<A>,
    pub termination: Termination,
    /// Per-agent trajectories, if dataset generation was enabled.
    pub record: Option<EpisodeRecord>,
    /// Offline-RL arrays, if enabled.
    pub offline: Option<OfflineRlRecord>,
}

impl<A> Episode<A> {
    pub fn timed_out(&self) -> bool {
        self.termination == Termination::Timeout
    }
}

/// Errors raised while running an episode.
#[derive(Debug, Error)]
pub enum RolloutError<E: std::error::Error + 'static> {
    #[error("Environment step {step} failed: {source}")]
    Step {
        step: u32,
        #[source]
        source: E,
    },

    #[error("Environment reset failed: {0}")]
    Reset(#[source] E),

    #[error("Recorded arrays have inconsistent shapes: {0}")]
    Shape(#[from] ShapeError),

    #[error("Invalid rollout configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Runs single episodes under a fixed [`RolloutConfig`].
///
/// The runner never chooses actions: every step passes a placeholder and
/// the environment resolves each agent's action through its own policy.
/// It also never loops across episodes; callers invoke [`EpisodeRunner::run`]
/// once per episode.
#[derive(Debug, Clone, Default)]
pub struct EpisodeRunner {
    config: RolloutConfig,
}

impl EpisodeRunner {
    pub fn new(config: RolloutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Runs one episode to completion and resets the environment.
    ///
    /// # Errors
    ///
    /// A zero `max_episode_length` is rejected with [`RolloutError::Config`]
    /// before the environment is touched. Any failure of the environment's `step` or `reset` is returned as is,
    /// without retry. Recorded arrays that cannot be stacked (for example
    /// observations whose shape changes mid-episode) yield
    /// [`RolloutError::Shape`].
    pub fn run<E>(&self, env: &mut E) -> Result<Episode<E::Agent>, RolloutError<E::Error>>
    where
        E: Environment,
        E::Observation: ObservationTensor,
    {
        self.config.validate()?;
        let max_len = self.config.max_episode_length;
        let mut recorder = StepRecorder::new(&self.config);

        let num_agents = env.num_agents();
        let mut total_reward = vec![0.0; num_agents];
        let mut step = 0u32;
        let mut terminated = false;
        let mut timeout = false;

        while !terminated {
            let transition = env.step(None).map_err(|source| RolloutError::Step {
                step: step + 1,
                source,
            })?;
            let rewards = per_agent_rewards(&transition.rewards, num_agents);
            for (total, r) in total_reward.iter_mut().zip(&rewards) {
                *total += r;
            }
            step += 1;
            terminated = transition.terminated;

            if step == max_len {
                debug!(step, "step ceiling reached, forcing timeout");
                terminated = true;
                timeout = true;
            }
            trace!(step, reward = transition.total_reward(), terminated, "step");

            if recorder.is_active() {
                let flags = StepFlags {
                    step,
                    terminated,
                    timeout,
                };
                recorder.record(flags, env.agents(), &transition.observation, &rewards);
            }
        }

        let agents = env.agents().to_vec();
        let (record, offline) = recorder.finish(agents.len())?;
        let stats = EpisodeStats::from_agents(&agents, total_reward, step);
        let termination = if timeout {
            Termination::Timeout
        } else {
            Termination::Terminated
        };

        env.reset().map_err(RolloutError::Reset)?;

        let id = generate_id();
        debug!(
            episode = %id,
            steps = step,
            outcome = %stats.outcome,
            total_reward = stats.reward_sum(),
            ?termination,
            "episode finished"
        );

        Ok(Episode {
            id,
            stats,
            agents,
            termination,
            record,
            offline,
        })
    }
}

/// Runs one episode with `config`. See [`EpisodeRunner::run`].
pub fn run_episode<E>(
    env: &mut E,
    config: &RolloutConfig,
) -> Result<Episode<E::Agent>, RolloutError<E::Error>>
where
    E: Environment,
    E::Observation: ObservationTensor,
{
    EpisodeRunner::new(config.clone()).run(env)
}
