//! Concrete [`Updater`](super::traits::Updater) plugins.

pub mod add_linear_chains;
pub mod read_bfm;
pub mod relabel;
