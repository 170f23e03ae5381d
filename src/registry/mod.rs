//! Policy registry.
//!
//! Static catalog mapping experiment names to the policy family, network
//! checkpoint and sensor setup of the agents under test. Consumed by
//! evaluation drivers; the runner and the environment factory never read it.

pub mod error;
pub mod policy;
pub mod table;

pub use error::RegistryError;
pub use policy::{AgentSorting, Checkpoint, PolicyConfig, PolicyKind, Sensor, SensorArgs};
pub use table::{lookup, names, POLICIES};
