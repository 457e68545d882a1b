//! # Engine Module
//!
//! The stateful layer that drives analyzers and updaters over a sequence of lattice
//! snapshots.
//!
//! ## Architecture
//!
//! - **Plugin Traits** ([`traits`]) - The `Analyzer` and `Updater` lifecycles
//! - **Scheduling** ([`task_manager`]) - Initialize once, execute per snapshot, clean up once
//! - **Lifecycle** ([`state`]) - The state machine the task manager enforces
//! - **Analyzers** ([`analyzers`]) - Shell contact counting, isotropic scattering, BFM output
//! - **Updaters** ([`updaters`]) - Stepwise reading, chain creation, relabeling
//! - **Configuration** ([`config`]) - Validated parameter sets and their builders
//! - **Progress Monitoring** ([`progress`]) - Optional callbacks for user feedback
//! - **Error Handling** ([`error`]) - Engine-level error type
//!
//! Every run is single-threaded and synchronous; one `execute` call finishes before the
//! next snapshot is produced.

pub mod analyzers;
pub mod config;
pub mod error;
pub mod progress;
pub mod state;
pub mod task_manager;
pub mod traits;
pub mod updaters;
pub mod utils;
