//! # bfmstat Core Library
//!
//! Analyzers and system builders for configurations of the bond fluctuation model (BFM),
//! a lattice model for polymer chains, solvent and co-solvent particles in a periodic box.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that the numerical kernels stay
//! independent from the file formats and from the order in which a run is driven.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`LatticeSystem`, `Particle`),
//!   periodic geometry, running moment statistics, and file I/O for BFM configurations
//!   and result tables.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer. It defines the `Analyzer` and
//!   `Updater` plugin traits, the `TaskManager` that drives them through their lifecycle
//!   one snapshot at a time, and the concrete plugins (shell contact counting, isotropic
//!   scattering, chain creation, relabeling).
//!
//! - **[`workflows`]: The Public API.** One entry point per driver program. Each workflow
//!   wires its plugins into a task manager and runs it to completion.

pub mod core;
pub mod engine;
pub mod workflows;
