//! Input and output of lattice configurations and analysis results.
//!
//! - [`bfm`] reads BFM configuration files snapshot by snapshot and writes them back.
//! - [`results`] formats accumulated statistics into commented, delimited text tables
//!   and derives their file names from the configuration name.

pub mod bfm;
pub mod results;
pub mod traits;
