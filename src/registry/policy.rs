use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Location of a pretrained network checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Checkpoint {
    /// Directory holding the checkpoint. `None` means the policy's default
    /// location.
    pub dir: Option<&'static str>,
    pub name: &'static str,
}

impl Checkpoint {
    pub const fn new(dir: Option<&'static str>, name: &'static str) -> Self {
        Self { dir, name }
    }

    /// `dir` joined with `name`, or just `name` when there is no directory.
    pub fn path(&self) -> PathBuf {
        match self.dir {
            Some(dir) => PathBuf::from(dir).join(self.name),
            None => PathBuf::from(self.name),
        }
    }
}

/// Policy family. Learned policies carry their checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "policy", rename_all = "snake_case"))]
pub enum PolicyKind {
    Ga3cCadrl { checkpoint: Checkpoint },
    Cadrl,
    Rvo,
    DrlLong { checkpoint: Checkpoint },
}

impl PolicyKind {
    /// Policy identifier as assigned to agents by the simulator.
    pub fn id(&self) -> &'static str {
        match self {
            PolicyKind::Ga3cCadrl { .. } => "GA3C_CADRL",
            PolicyKind::Cadrl => "CADRL",
            PolicyKind::Rvo => "RVO",
            PolicyKind::DrlLong { .. } => "drllong",
        }
    }

    pub fn checkpoint(&self) -> Option<&Checkpoint> {
        match self {
            PolicyKind::Ga3cCadrl { checkpoint } | PolicyKind::DrlLong { checkpoint } => {
                Some(checkpoint)
            }
            PolicyKind::Cadrl | PolicyKind::Rvo => None,
        }
    }

    pub fn is_learned(&self) -> bool {
        self.checkpoint().is_some()
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// What an agent running the policy perceives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Sensor {
    OtherAgentsStates,
    #[cfg_attr(feature = "serde", serde(rename = "laserscan"))]
    LaserScan,
}

impl Sensor {
    pub fn name(&self) -> &'static str {
        match self {
            Sensor::OtherAgentsStates => "other_agents_states",
            Sensor::LaserScan => "laserscan",
        }
    }
}

/// Ordering of the other agents in the sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentSorting {
    ClosestLast,
    ClosestFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SensorArgs {
    pub agent_sorting_method: AgentSorting,
    pub max_num_other_agents_observed: usize,
}

/// One registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PolicyConfig {
    pub policy: PolicyKind,
    pub sensors: &'static [Sensor],
    pub sensor_args: Option<SensorArgs>,
}

impl PolicyConfig {
    /// A non-learned baseline that only observes the other agents' states.
    pub const fn baseline(policy: PolicyKind) -> Self {
        Self {
            policy,
            sensors: &[Sensor::OtherAgentsStates],
            sensor_args: None,
        }
    }

    pub fn uses_sensor(&self, sensor: Sensor) -> bool {
        self.sensors.contains(&sensor)
    }
}
