//! Lattice-level data models.
//!
//! A BFM configuration is an ordered list of [`particle::Particle`]s living in a periodic
//! box, together with the bonds that connect them into chains and the simulation age of
//! the snapshot. Analyzers consume configurations only through the narrow
//! [`snapshot::Snapshot`] capability so that they never depend on how the host stores
//! or produces them.

pub mod bondset;
pub mod particle;
pub mod snapshot;
pub mod species;
pub mod system;
