//! Configuration for episode rollouts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::env::ConfigError;

/// Per-call options for [`EpisodeRunner`](super::runner::EpisodeRunner).
///
/// Controls the step ceiling and which side-channel records are built.
/// The runner's output shape is a function of this value only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RolloutConfig {
    /// Maximum number of steps per episode. Reaching it forces a timeout.
    pub max_episode_length: u32,
    /// Record per-agent states, actions and rewards.
    pub generate_dataset: bool,
    /// Record the observation/action/reward arrays used for offline RL.
    pub record_offline_rl: bool,
}

impl RolloutConfig {
    /// Returns a config with the given step ceiling and no recording.
    pub fn with_max_episode_length(max_episode_length: u32) -> Self {
        Self {
            max_episode_length,
            ..Self::default()
        }
    }

    /// Rejects a zero step ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_episode_length == 0 {
            return Err(ConfigError::ZeroMaxEpisodeLength);
        }
        Ok(())
    }

    /// Whether any per-step recording is requested.
    pub fn records_steps(&self) -> bool {
        self.generate_dataset || self.record_offline_rl
    }
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            max_episode_length: 100,
            generate_dataset: false,
            record_offline_rl: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = RolloutConfig::default();
        assert!(cfg.max_episode_length > 0);
        assert!(cfg.validate().is_ok());
        assert!(!cfg.records_steps());
    }

    #[test]
    fn zero_ceiling_is_rejected() {
        let cfg = RolloutConfig::with_max_episode_length(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMaxEpisodeLength));
        assert!(RolloutConfig::with_max_episode_length(1).validate().is_ok());
    }

    #[test]
    fn records_steps_when_any_flag_set() {
        let cfg = RolloutConfig {
            record_offline_rl: true,
            ..RolloutConfig::default()
        };
        assert!(cfg.records_steps());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_take_defaults() {
        let cfg: RolloutConfig = serde_json::from_str(r#"{"generate_dataset": true}"#).unwrap();
        assert_eq!(cfg.max_episode_length, 100);
        assert!(cfg.generate_dataset);
    }
}
