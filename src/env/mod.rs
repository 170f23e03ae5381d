//! Environment interface, observation shaping and the environment factory.
//!
//! The simulator itself is external: it is reached through the
//! [`Environment`] trait. [`create_env`] wraps a raw environment into an
//! [`ObservationEnv`] that emits either a flat single-agent vector or a
//! padded multi-agent array. [`ScriptedEnv`] is a deterministic stand-in
//! used by tests and dry runs.

pub mod agent;
pub mod factory;
pub mod observation;
pub mod scripted;
pub mod traits;
pub mod types;

pub use agent::{observe, AgentView};
pub use factory::{create_env, ConfigError, EnvConfig};
pub use observation::{Observation, ObservationEnv, ObservationMode, WrapperError};
pub use scripted::{Fate, ScriptedAgent, ScriptedEnv, ScriptedEnvError};
pub use traits::{
    AgentObservation, DictObservation, Environment, ObservationTensor, StepInfo, Transition,
};
pub use types::{AgentAction, Pose, Position, StateField, UnknownStateField};
