use crate::core::models::system::BoxDims;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_NUM_Q: usize = 200;
pub const DEFAULT_DIRECTIONS: usize = 10;
pub const DEFAULT_Q_MIN: f64 = 0.1;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Settings of the nearest-neighbour shell contact analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactConfig {
    /// First snapshot age included in the statistics (`age >= start_time`).
    pub start_time: u64,
    pub dst_dir: PathBuf,
    /// Snapshots older than this end the run.
    pub max_mcs: Option<u64>,
    /// Only ages that are multiples of this are analysed; `0` analyses every snapshot.
    pub save_interval: u64,
    /// Co-solvent count the caller expects in the input, checked against the file.
    pub expected_cosolvent: Option<usize>,
    /// Nearest-neighbour interaction energy, recorded in the result header.
    pub nn_interaction: Option<f64>,
}

#[derive(Default)]
pub struct ContactConfigBuilder {
    start_time: Option<u64>,
    dst_dir: Option<PathBuf>,
    max_mcs: Option<u64>,
    save_interval: Option<u64>,
    expected_cosolvent: Option<usize>,
    nn_interaction: Option<f64>,
}

impl ContactConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_time(mut self, start_time: u64) -> Self {
        self.start_time = Some(start_time);
        self
    }
    pub fn dst_dir(mut self, dir: PathBuf) -> Self {
        self.dst_dir = Some(dir);
        self
    }
    pub fn max_mcs(mut self, max_mcs: Option<u64>) -> Self {
        self.max_mcs = max_mcs;
        self
    }
    pub fn save_interval(mut self, interval: u64) -> Self {
        self.save_interval = Some(interval);
        self
    }
    pub fn expected_cosolvent(mut self, count: Option<usize>) -> Self {
        self.expected_cosolvent = count;
        self
    }
    pub fn nn_interaction(mut self, epsilon: Option<f64>) -> Self {
        self.nn_interaction = epsilon;
        self
    }

    pub fn build(self) -> Result<ContactConfig, ConfigError> {
        if self.max_mcs == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "max_mcs",
                reason: "simulation time must be greater than 0".into(),
            });
        }
        Ok(ContactConfig {
            start_time: self.start_time.unwrap_or(0),
            dst_dir: self
                .dst_dir
                .ok_or(ConfigError::MissingParameter("dst_dir"))?,
            max_mcs: self.max_mcs,
            save_interval: self.save_interval.unwrap_or(0),
            expected_cosolvent: self.expected_cosolvent,
            nn_interaction: self.nn_interaction,
        })
    }
}

/// Settings of the isotropic scattering (form factor) analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringConfig {
    /// Snapshots are sampled only when `age > evaluation_time`.
    pub evaluation_time: u64,
    /// Results are written only if more than this many snapshots were executed.
    pub relax_time: u64,
    pub num_q: usize,
    pub directions: usize,
    /// Smallest q multiplier before the first geometric step.
    pub q_min: f64,
    pub dst_dir: PathBuf,
}

#[derive(Default)]
pub struct ScatteringConfigBuilder {
    evaluation_time: Option<u64>,
    relax_time: Option<u64>,
    num_q: Option<usize>,
    directions: Option<usize>,
    q_min: Option<f64>,
    dst_dir: Option<PathBuf>,
}

impl ScatteringConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluation_time(mut self, time: u64) -> Self {
        self.evaluation_time = Some(time);
        self
    }
    pub fn relax_time(mut self, time: u64) -> Self {
        self.relax_time = Some(time);
        self
    }
    pub fn num_q(mut self, num_q: usize) -> Self {
        self.num_q = Some(num_q);
        self
    }
    pub fn directions(mut self, directions: usize) -> Self {
        self.directions = Some(directions);
        self
    }
    pub fn q_min(mut self, q_min: f64) -> Self {
        self.q_min = Some(q_min);
        self
    }
    pub fn dst_dir(mut self, dir: PathBuf) -> Self {
        self.dst_dir = Some(dir);
        self
    }

    pub fn build(self) -> Result<ScatteringConfig, ConfigError> {
        let num_q = self.num_q.unwrap_or(DEFAULT_NUM_Q);
        if num_q == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "num_q",
                reason: "at least one q bin is required".into(),
            });
        }
        let directions = self.directions.unwrap_or(DEFAULT_DIRECTIONS);
        if directions == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "directions",
                reason: "at least one random direction is required".into(),
            });
        }
        let q_min = self.q_min.unwrap_or(DEFAULT_Q_MIN);
        if !(q_min.is_finite() && q_min > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "q_min",
                reason: format!("must be a positive number, got {}", q_min),
            });
        }
        Ok(ScatteringConfig {
            evaluation_time: self.evaluation_time.unwrap_or(0),
            relax_time: self.relax_time.unwrap_or(0),
            num_q,
            directions,
            q_min,
            dst_dir: self
                .dst_dir
                .ok_or(ConfigError::MissingParameter("dst_dir"))?,
        })
    }
}

/// Settings for building a polymer plus co-solvent starting configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SolventConfig {
    pub output_path: PathBuf,
    pub box_dims: BoxDims,
    pub num_chains: usize,
    pub chain_length: usize,
    pub cosolvent_1: usize,
    pub cosolvent_2: usize,
}

#[derive(Default)]
pub struct SolventConfigBuilder {
    output_path: Option<PathBuf>,
    box_dims: Option<BoxDims>,
    num_chains: Option<usize>,
    chain_length: Option<usize>,
    cosolvent_1: Option<usize>,
    cosolvent_2: Option<usize>,
}

impl SolventConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn box_dims(mut self, dims: BoxDims) -> Self {
        self.box_dims = Some(dims);
        self
    }
    pub fn num_chains(mut self, n: usize) -> Self {
        self.num_chains = Some(n);
        self
    }
    pub fn chain_length(mut self, length: usize) -> Self {
        self.chain_length = Some(length);
        self
    }
    pub fn cosolvent_1(mut self, n: usize) -> Self {
        self.cosolvent_1 = Some(n);
        self
    }
    pub fn cosolvent_2(mut self, n: usize) -> Self {
        self.cosolvent_2 = Some(n);
        self
    }

    pub fn build(self) -> Result<SolventConfig, ConfigError> {
        let chain_length = self
            .chain_length
            .ok_or(ConfigError::MissingParameter("chain_length"))?;
        if chain_length == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "chain_length",
                reason: "chain length must be greater than 0".into(),
            });
        }
        let box_dims = self.box_dims.unwrap_or_default();
        if !box_dims.is_valid() {
            return Err(ConfigError::InvalidParameter {
                name: "box_dims",
                reason: format!("box extents must be positive, got {:?}", box_dims),
            });
        }
        Ok(SolventConfig {
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            box_dims,
            num_chains: self.num_chains.unwrap_or(1),
            chain_length,
            cosolvent_1: self
                .cosolvent_1
                .ok_or(ConfigError::MissingParameter("cosolvent_1"))?,
            cosolvent_2: self
                .cosolvent_2
                .ok_or(ConfigError::MissingParameter("cosolvent_2"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scattering_builder_applies_defaults() {
        let config = ScatteringConfigBuilder::new()
            .dst_dir(PathBuf::from("."))
            .build()
            .unwrap();
        assert_eq!(config.num_q, DEFAULT_NUM_Q);
        assert_eq!(config.directions, DEFAULT_DIRECTIONS);
        assert_eq!(config.q_min, DEFAULT_Q_MIN);
        assert_eq!(config.evaluation_time, 0);
    }

    #[test]
    fn scattering_builder_rejects_zero_bins_and_missing_destination() {
        let zero_bins = ScatteringConfigBuilder::new()
            .dst_dir(PathBuf::from("."))
            .num_q(0)
            .build();
        assert!(matches!(
            zero_bins,
            Err(ConfigError::InvalidParameter { name: "num_q", .. })
        ));

        let missing = ScatteringConfigBuilder::new().build();
        assert_eq!(missing, Err(ConfigError::MissingParameter("dst_dir")));
    }

    #[test]
    fn contact_builder_rejects_zero_max_mcs() {
        let result = ContactConfigBuilder::new()
            .dst_dir(PathBuf::from("."))
            .max_mcs(Some(0))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "max_mcs", .. })
        ));
    }

    #[test]
    fn solvent_builder_requires_positive_chain_length() {
        let result = SolventConfigBuilder::new()
            .output_path(PathBuf::from("out.bfm"))
            .chain_length(0)
            .cosolvent_1(0)
            .cosolvent_2(0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "chain_length",
                ..
            })
        ));
    }

    #[test]
    fn solvent_builder_defaults_to_single_chain_in_64_box() {
        let config = SolventConfigBuilder::new()
            .output_path(PathBuf::from("out.bfm"))
            .chain_length(128)
            .cosolvent_1(100)
            .cosolvent_2(100)
            .build()
            .unwrap();
        assert_eq!(config.num_chains, 1);
        assert_eq!(config.box_dims, BoxDims::cubic(64));
    }
}
