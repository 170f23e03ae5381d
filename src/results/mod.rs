//! Results accumulation.
//!
//! A [`ResultsTable`] holds one [`Record`] per evaluated episode: the run's
//! hyperparameters merged with the episode's flattened statistics.

pub mod cell;
pub mod record;
pub mod table;

pub use cell::Cell;
pub use record::Record;
pub use table::{store_stats, ResultsTable};
