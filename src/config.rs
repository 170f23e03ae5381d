//! Experiment configuration.

#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env::{ConfigError, EnvConfig};
use crate::rollout::RolloutConfig;

/// Environment and rollout settings of one experiment.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExperimentConfig {
    pub env: EnvConfig,
    pub rollout: RolloutConfig,
}

/// Failure to load an [`ExperimentConfig`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

impl ExperimentConfig {
    /// Checks that the environment section describes a valid observation
    /// and that the rollout has a non-zero step ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.env.state_fields()?;
        self.env.observation_mode()?;
        self.rollout.validate()
    }

    /// Parses and validates a JSON document. Missing keys take their
    /// default values.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let config: ExperimentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ExperimentConfig::default().validate().is_ok());
    }

    #[test]
    fn invalid_env_section() {
        let mut cfg = ExperimentConfig::default();
        cfg.env.states_in_obs = vec!["velocity".into()];
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::UnknownStateField(_))
        ));
    }

    #[test]
    fn zero_episode_length_is_invalid() {
        let mut cfg = ExperimentConfig::default();
        cfg.rollout.max_episode_length = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMaxEpisodeLength));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let cfg = ExperimentConfig::from_json_str(
            r#"{"env": {"train_single_agent": true, "states_in_obs": ["pos", "heading"]},
                "rollout": {"generate_dataset": true}}"#,
        )
        .unwrap();
        assert!(cfg.env.train_single_agent);
        assert_eq!(cfg.env.max_num_agents_in_environment, 4);
        assert_eq!(cfg.rollout.max_episode_length, 100);
        assert!(cfg.rollout.generate_dataset);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rejects_invalid_json_config() {
        let err = ExperimentConfig::from_json_str(r#"{"env": {"states_in_obs": []}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::NoStateFields)));
        let err =
            ExperimentConfig::from_json_str(r#"{"rollout": {"max_episode_length": 0}}"#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(ConfigError::ZeroMaxEpisodeLength)
        ));
        let err = ExperimentConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_file() {
        let err = ExperimentConfig::from_path("/nonexistent/experiment.json").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
