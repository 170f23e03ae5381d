//! ca_experiments - experiment harness for multi-agent collision avoidance
//!
//! Builds observation-shaped environments, rolls episodes out under the
//! agents' own policies, aggregates per-episode statistics into a results
//! table, and catalogs pretrained policy checkpoints.

pub mod config;
pub mod env;
pub mod registry;
pub mod results;
pub mod rollout;

pub use config::{ExperimentConfig, LoadError};
pub use env::{create_env, EnvConfig, Environment, ObservationEnv};
pub use registry::{lookup, PolicyConfig, PolicyKind, RegistryError};
pub use results::{store_stats, Cell, Record, ResultsTable};
pub use rollout::{Episode, EpisodeRunner, EpisodeStats, Outcome, RolloutConfig};

/// Identifier type used for episodes and experiment runs.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
