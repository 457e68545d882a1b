//! Concrete [`Analyzer`](super::traits::Analyzer) plugins.
//!
//! - [`nn_shell_contacts`] counts co-solvent particles in the nearest-neighbour shell of
//!   polymer monomers and those bridging two or more monomers.
//! - [`scattering`] estimates the isotropic structure factor of the polymer.
//! - [`write_bfm`] writes the current configuration to a BFM file.

pub mod nn_shell_contacts;
pub mod scattering;
pub mod write_bfm;
