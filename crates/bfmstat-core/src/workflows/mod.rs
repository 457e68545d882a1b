//! One entry point per driver program.
//!
//! Each workflow builds its plugins from a validated configuration, registers them with a
//! [`TaskManager`](crate::engine::task_manager::TaskManager) and drives the full
//! initialize, run and cleanup lifecycle.

use std::path::PathBuf;

pub mod contacts;
pub mod relabel;
pub mod scattering;
pub mod solvent;

/// Outcome of an analysis run over a trajectory file.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Snapshots read from the input, including the first one.
    pub snapshots_read: usize,
    /// Cycles the task manager completed.
    pub cycles: u64,
    /// Snapshots that entered the statistics.
    pub samples: u64,
    /// Result file, if one was written.
    pub output_path: Option<PathBuf>,
    /// Seed of the run's random number generator, for stochastic analyses.
    pub seed: Option<u64>,
}

/// Outcome of a workflow that writes a configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationReport {
    pub output_path: PathBuf,
    pub particles: usize,
    pub bonds: usize,
    pub seed: Option<u64>,
}
