//! Observation shaping wrappers.
//!
//! The raw environment emits a dict observation per agent. Most RL code
//! cannot consume dicts, so [`ObservationEnv`] converts them into dense
//! arrays:
//!
//! ```text
//! SingleAgent:  agent_0[f_1] ++ agent_0[f_2] ++ ...                 shape (Σ|f|,)
//! MultiAgent:   row i = agent_i[f_1] ++ agent_i[f_2] ++ ...          shape (max_agents, Σ|f|)
//! ```
//!
//! In multi-agent mode, rows beyond the number of agents are zero-padded and
//! agents beyond `max_agents` are dropped.

use ndarray::{Array1, Array2, ArrayD};
use thiserror::Error;

use super::traits::{AgentObservation, DictObservation, Environment, ObservationTensor, Transition};
use super::types::{AgentAction, StateField};

/// Observation shape selected by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationMode {
    /// Flat vector over the configured fields of agent 0 only.
    SingleAgent,
    /// One row per agent, padded or truncated to `max_agents`.
    MultiAgent { max_agents: usize },
}

/// A shaped observation.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    Flat(Array1<f64>),
    Stacked(Array2<f64>),
}

impl Observation {
    pub fn shape(&self) -> &[usize] {
        match self {
            Observation::Flat(a) => a.shape(),
            Observation::Stacked(a) => a.shape(),
        }
    }

    pub fn as_flat(&self) -> Option<&Array1<f64>> {
        match self {
            Observation::Flat(a) => Some(a),
            Observation::Stacked(_) => None,
        }
    }

    pub fn as_stacked(&self) -> Option<&Array2<f64>> {
        match self {
            Observation::Stacked(a) => Some(a),
            Observation::Flat(_) => None,
        }
    }
}

impl ObservationTensor for Observation {
    fn to_array(&self) -> ArrayD<f64> {
        match self {
            Observation::Flat(a) => a.clone().into_dyn(),
            Observation::Stacked(a) => a.clone().into_dyn(),
        }
    }
}

/// Errors raised while stepping a shaped environment.
#[derive(Debug, Error)]
pub enum WrapperError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Env(E),

    #[error("Observation of agent {agent} has no `{field}` entry")]
    MissingField { agent: usize, field: StateField },

    #[error("Observation of agent {agent} has {actual} values for `{field}`, expected {expected}")]
    FieldSize {
        agent: usize,
        field: StateField,
        expected: usize,
        actual: usize,
    },

    #[error("Single-agent observation requested but the environment hosts no agents")]
    NoAgents,
}

/// Environment wrapper that converts dict observations into dense arrays.
///
/// Built by [`create_env`](super::factory::create_env).
#[derive(Debug)]
pub struct ObservationEnv<E> {
    env: E,
    fields: Vec<StateField>,
    mode: ObservationMode,
}

impl<E> ObservationEnv<E>
where
    E: Environment<Observation = DictObservation>,
{
    pub(crate) fn new(env: E, fields: Vec<StateField>, mode: ObservationMode) -> Self {
        Self { env, fields, mode }
    }

    pub fn mode(&self) -> ObservationMode {
        self.mode
    }

    /// Fields exposed in observations, in observation order.
    pub fn fields(&self) -> &[StateField] {
        &self.fields
    }

    /// Number of values contributed by one agent.
    pub fn row_len(&self) -> usize {
        StateField::total_size(&self.fields)
    }

    /// Shape of every observation this wrapper produces.
    pub fn observation_shape(&self) -> Vec<usize> {
        match self.mode {
            ObservationMode::SingleAgent => vec![self.row_len()],
            ObservationMode::MultiAgent { max_agents } => vec![max_agents, self.row_len()],
        }
    }

    /// Get a reference to the inner environment
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// Get a mutable reference to the inner environment
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn into_inner(self) -> E {
        self.env
    }

    /// Concatenates the configured fields of one agent, in field order.
    fn encode_agent(
        &self,
        index: usize,
        agent: &AgentObservation,
    ) -> Result<Vec<f64>, WrapperError<E::Error>> {
        let mut row = Vec::with_capacity(self.row_len());
        for &field in &self.fields {
            let values = agent.get(&field).ok_or(WrapperError::MissingField {
                agent: index,
                field,
            })?;
            if values.len() != field.size() {
                return Err(WrapperError::FieldSize {
                    agent: index,
                    field,
                    expected: field.size(),
                    actual: values.len(),
                });
            }
            row.extend_from_slice(values);
        }
        Ok(row)
    }

    fn shape(&self, raw: &DictObservation) -> Result<Observation, WrapperError<E::Error>> {
        match self.mode {
            ObservationMode::SingleAgent => {
                let first = raw.first().ok_or(WrapperError::NoAgents)?;
                Ok(Observation::Flat(Array1::from(self.encode_agent(0, first)?)))
            }
            ObservationMode::MultiAgent { max_agents } => {
                let mut stacked = Array2::zeros((max_agents, self.row_len()));
                for (i, agent) in raw.iter().take(max_agents).enumerate() {
                    let row = Array1::from(self.encode_agent(i, agent)?);
                    stacked.row_mut(i).assign(&row);
                }
                Ok(Observation::Stacked(stacked))
            }
        }
    }
}

impl<E> Environment for ObservationEnv<E>
where
    E: Environment<Observation = DictObservation>,
{
    type Observation = Observation;
    type Agent = E::Agent;
    type Error = WrapperError<E::Error>;

    fn step(
        &mut self,
        action: Option<&[AgentAction]>,
    ) -> Result<Transition<Observation>, Self::Error> {
        let transition = self.env.step(action).map_err(WrapperError::Env)?;
        let observation = self.shape(&transition.observation)?;
        Ok(transition.map_observation(|_| observation))
    }

    fn reset(&mut self) -> Result<Observation, Self::Error> {
        let raw = self.env.reset().map_err(WrapperError::Env)?;
        self.shape(&raw)
    }

    fn agents(&self) -> &[E::Agent] {
        self.env.agents()
    }
}
