//! Episode rollout and statistics.
//!
//! [`EpisodeRunner`] drives one episode of an [`Environment`](crate::env::Environment)
//! to completion, optionally recording a per-agent dataset and an offline-RL
//! record, and returns the [`EpisodeStats`] of the terminal agent states.
//! [`EvaluationSummary`] aggregates statistics over many episodes.

pub mod config;
pub mod record;
pub mod runner;
pub mod stats;
pub mod summary;

#[cfg(test)]
mod tests;

pub use config::RolloutConfig;
pub use record::{
    agent_major, per_agent_rewards, EpisodeRecord, OfflineRlRecord, StepFlags, StepRecorder,
};
pub use runner::{run_episode, Episode, EpisodeRunner, RolloutError, Termination};
pub use stats::{AgentOutcome, EpisodeStats, Outcome};
pub use summary::EvaluationSummary;
