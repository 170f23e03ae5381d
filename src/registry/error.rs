use thiserror::Error;

/// Errors raised by registry lookups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown experiment: '{0}'")]
    UnknownExperiment(String),
}
