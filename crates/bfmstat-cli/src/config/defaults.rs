use bfmstat::engine::config::{DEFAULT_DIRECTIONS, DEFAULT_NUM_Q, DEFAULT_Q_MIN};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub dst_dir: PathBuf,
    pub start_time: u64,
    pub save_interval: u64,
    pub evaluation_time: u64,
    pub relax_time: u64,
    pub num_q: usize,
    pub directions: usize,
    pub q_min: f64,
    pub box_length: i32,
    pub num_chains: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            dst_dir: PathBuf::from("."),
            start_time: 0,
            save_interval: 0,
            evaluation_time: 0,
            relax_time: 0,
            num_q: DEFAULT_NUM_Q,
            directions: DEFAULT_DIRECTIONS,
            q_min: DEFAULT_Q_MIN,
            box_length: 64,
            num_chains: 1,
        }
    }
}
