//! # Core Module
//!
//! Stateless building blocks shared by every analyzer and updater.
//!
//! - **Lattice Representation** ([`models`]) - Particles, species tags, box geometry and the
//!   BFM bond-vector set
//! - **Statistics** ([`statistics`]) - Running first and second moments of scalar samples
//! - **File I/O** ([`io`]) - Stepwise BFM configuration reading, BFM writing, result tables
//! - **Geometry** ([`utils`]) - Minimum-image folding under periodic boundary conditions

pub mod io;
pub mod models;
pub mod statistics;
pub mod utils;
