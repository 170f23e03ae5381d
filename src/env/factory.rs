//! Environment factory: selects the observation shape from configuration.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::observation::{ObservationEnv, ObservationMode};
use super::traits::{DictObservation, Environment};
use super::types::{StateField, UnknownStateField};

/// Configuration of the observation shape exposed by the environment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvConfig {
    /// Expose the observation of a single agent as a flat vector.
    pub train_single_agent: bool,
    /// State fields included in each agent's observation, in order.
    pub states_in_obs: Vec<String>,
    /// Number of rows of the multi-agent observation array.
    pub max_num_agents_in_environment: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            train_single_agent: false,
            states_in_obs: vec![
                "dist_to_goal".to_string(),
                "heading_ego_frame".to_string(),
                "pref_speed".to_string(),
                "radius".to_string(),
            ],
            max_num_agents_in_environment: 4,
        }
    }
}

impl EnvConfig {
    /// Parses and validates `states_in_obs`.
    pub fn state_fields(&self) -> Result<Vec<StateField>, ConfigError> {
        if self.states_in_obs.is_empty() {
            return Err(ConfigError::NoStateFields);
        }
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(self.states_in_obs.len());
        for name in &self.states_in_obs {
            let field: StateField = name.parse()?;
            if !seen.insert(field) {
                return Err(ConfigError::DuplicateStateField(name.clone()));
            }
            fields.push(field);
        }
        Ok(fields)
    }

    /// Observation mode selected by this configuration.
    pub fn observation_mode(&self) -> Result<ObservationMode, ConfigError> {
        if self.train_single_agent {
            Ok(ObservationMode::SingleAgent)
        } else if self.max_num_agents_in_environment == 0 {
            Err(ConfigError::ZeroMaxAgents)
        } else {
            Ok(ObservationMode::MultiAgent {
                max_agents: self.max_num_agents_in_environment,
            })
        }
    }
}

/// Malformed experiment configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    UnknownStateField(#[from] UnknownStateField),

    #[error("State field listed more than once: {0}")]
    DuplicateStateField(String),

    #[error("At least one state field must be exposed in observations")]
    NoStateFields,

    #[error("Multi-agent observations need max_num_agents_in_environment > 0")]
    ZeroMaxAgents,

    #[error("max_episode_length must be at least 1")]
    ZeroMaxEpisodeLength,
}

/// Wraps a raw environment so that it emits the observation shape selected
/// by `config`.
///
/// # Arguments
///
/// * `env` - Raw environment producing dict observations
/// * `config` - Observation mode, exposed fields and maximum agent count
pub fn create_env<E>(env: E, config: &EnvConfig) -> Result<ObservationEnv<E>, ConfigError>
where
    E: Environment<Observation = DictObservation>,
{
    let fields = config.state_fields()?;
    let mode = config.observation_mode()?;
    debug!(?mode, fields = ?fields, "created environment");
    Ok(ObservationEnv::new(env, fields, mode))
}
