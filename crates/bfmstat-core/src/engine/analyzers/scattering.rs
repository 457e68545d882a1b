use crate::core::io::results::{ResultTable, result_file_path, write_result_file};
use crate::core::models::particle::Particle;
use crate::core::models::snapshot::Snapshot;
use crate::core::models::species::{AttributeTag, CHAIN};
use crate::core::models::system::LatticeSystem;
use crate::engine::config::ScatteringConfig;
use crate::engine::error::EngineError;
use crate::engine::traits::Analyzer;
use crate::engine::utils::sampling::random_unit_vector;
use nalgebra::{Complex, Vector3};
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

pub const SCATTERING_SUFFIX: &str = "ScatteringFct";

/// Allowed excess of the last q multiplier over `4 * box_x`.
pub const Q_TABLE_TOLERANCE: f64 = 1e-5;

/// Geometric sequence of q multipliers, fixed for a whole run.
///
/// Physical wavevector magnitudes are the multipliers scaled by `2π / box_x`.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    factors: Vec<f64>,
    scale: f64,
}

impl QTable {
    /// Builds `num_q` multipliers `x_i = x_{i-1} * k` starting from `x_0 = q_min`, with
    /// `k = (10 * box_x)^(1 / num_q)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidQTable`] if the box length is not positive, the table
    /// is not strictly increasing, or its last entry exceeds `4 * box_x` by more than
    /// [`Q_TABLE_TOLERANCE`].
    pub fn geometric(q_min: f64, num_q: usize, box_x: i32) -> Result<Self, EngineError> {
        if box_x <= 0 {
            return Err(EngineError::InvalidQTable(format!(
                "box length must be positive, got {}",
                box_x
            )));
        }
        if num_q == 0 {
            return Err(EngineError::InvalidQTable("no q bins requested".into()));
        }

        let box_x_f = f64::from(box_x);
        let k = (10.0 * box_x_f).powf(1.0 / num_q as f64);
        debug!(k, "Multiplier between consecutive q bins.");

        let mut factors = Vec::with_capacity(num_q);
        let mut x = q_min;
        for _ in 0..num_q {
            x *= k;
            factors.push(x);
        }

        if factors.windows(2).any(|w| w[1] <= w[0]) {
            return Err(EngineError::InvalidQTable(format!(
                "sequence is not strictly increasing (multiplier k = {})",
                k
            )));
        }
        let last = factors[num_q - 1];
        if last - 4.0 * box_x_f > Q_TABLE_TOLERANCE {
            return Err(EngineError::InvalidQTable(format!(
                "last entry {} exceeds 4 * box_x = {}",
                last,
                4.0 * box_x_f
            )));
        }

        Ok(Self {
            factors,
            scale: 2.0 * PI / box_x_f,
        })
    }

    pub fn factors(&self) -> &[f64] {
        &self.factors
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn magnitude(&self, i: usize) -> f64 {
        self.factors[i] * self.scale
    }
}

/// Contribution of a species to the scattering amplitude. Only chain monomers scatter.
pub fn scattering_weight(tag: AttributeTag) -> f64 {
    if tag == CHAIN { 1.0 } else { 0.0 }
}

/// `Σ w_j exp(-i q·r_j)` over all particles.
///
/// Every particle is visited; non-scattering species contribute with weight zero.
pub fn scattering_amplitude(particles: &[Particle], q: &Vector3<f64>) -> Complex<f64> {
    particles
        .iter()
        .fold(Complex::new(0.0, 0.0), |amplitude, particle| {
            let r = Vector3::new(
                f64::from(particle.position.x),
                f64::from(particle.position.y),
                f64::from(particle.position.z),
            );
            let phase = -r.dot(q);
            amplitude + Complex::from_polar(scattering_weight(particle.tag), phase)
        })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringAccumulator {
    squared_amplitude: Vec<f64>,
    samples: Vec<f64>,
}

impl ScatteringAccumulator {
    pub fn new(num_q: usize) -> Self {
        Self {
            squared_amplitude: vec![0.0; num_q],
            samples: vec![0.0; num_q],
        }
    }

    /// Adds `directions` random orientations of every q magnitude for one snapshot.
    pub fn sample<S: Snapshot + ?Sized>(
        &mut self,
        snapshot: &S,
        table: &QTable,
        directions: usize,
        rng: &mut impl Rng,
    ) {
        let particles = snapshot.particles();
        for _ in 0..directions {
            let direction = random_unit_vector(rng);
            for bin in 0..table.len() {
                let q = direction * table.magnitude(bin);
                let amplitude = scattering_amplitude(particles, &q);
                self.squared_amplitude[bin] += amplitude.norm_sqr();
                self.samples[bin] += 1.0;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.iter().all(|&n| n == 0.0)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// `S(q_i) = Σ|C(q_i)|² / (samples_i * num_scatterers)`.
    pub fn structure_factor(&self, num_scatterers: usize) -> Vec<f64> {
        self.squared_amplitude
            .iter()
            .zip(&self.samples)
            .map(|(sum, n)| sum / (n * num_scatterers as f64))
            .collect()
    }
}

/// Isotropic scattering analyzer estimating the form factor of the chain monomers.
pub struct ScatteringAnalyzer {
    config: ScatteringConfig,
    rng: StdRng,
    q_table: Option<QTable>,
    accumulator: ScatteringAccumulator,
    executed_steps: u64,
    output_path: Option<PathBuf>,
}

impl ScatteringAnalyzer {
    pub fn new(config: ScatteringConfig, rng: StdRng) -> Self {
        let accumulator = ScatteringAccumulator::new(config.num_q);
        Self {
            config,
            rng,
            q_table: None,
            accumulator,
            executed_steps: 0,
            output_path: None,
        }
    }

    pub fn executed_steps(&self) -> u64 {
        self.executed_steps
    }

    pub fn q_table(&self) -> Option<&QTable> {
        self.q_table.as_ref()
    }

    pub fn accumulator(&self) -> &ScatteringAccumulator {
        &self.accumulator
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn is_eligible(&self, age: u64) -> bool {
        age > self.config.evaluation_time
    }
}

impl Analyzer for ScatteringAnalyzer {
    fn name(&self) -> &'static str {
        "ScatteringAnalyzer"
    }

    /// Builds the q table and analyses the snapshot the reader has already loaded.
    fn initialize(&mut self, system: &LatticeSystem) -> Result<(), EngineError> {
        let table = QTable::geometric(self.config.q_min, self.config.num_q, system.box_dims().x)?;
        info!(
            bins = table.len(),
            q_first = table.magnitude(0),
            q_last = table.magnitude(table.len() - 1),
            "Scattering analyzer initialized."
        );
        self.q_table = Some(table);
        self.accumulator = ScatteringAccumulator::new(self.config.num_q);
        self.execute(system)?;
        Ok(())
    }

    #[instrument(skip_all, name = "scattering_execute", fields(age = system.age()))]
    fn execute(&mut self, system: &LatticeSystem) -> Result<bool, EngineError> {
        self.executed_steps += 1;
        let Some(table) = &self.q_table else {
            return Err(EngineError::Internal(
                "scattering analyzer executed before initialization".into(),
            ));
        };

        if self.is_eligible(system.age()) {
            self.accumulator
                .sample(system, table, self.config.directions, &mut self.rng);
            debug!(step = self.executed_steps, "Sampled scattering amplitudes.");
        } else {
            debug!(step = self.executed_steps, "Snapshot before evaluation time, skipping.");
        }
        Ok(true)
    }

    fn cleanup(&mut self, system: &LatticeSystem) -> Result<(), EngineError> {
        if self.executed_steps <= self.config.relax_time || self.accumulator.is_empty() {
            warn!(
                executed = self.executed_steps,
                relax_time = self.config.relax_time,
                "Not enough configurations in the input; no scattering output written."
            );
            return Ok(());
        }
        let num_scatterers = system.count_tagged(CHAIN);
        if num_scatterers == 0 {
            warn!("No chain monomers present; the structure factor is undefined, nothing written.");
            return Ok(());
        }
        let Some(table) = &self.q_table else {
            return Err(EngineError::Internal(
                "scattering analyzer cleaned up before initialization".into(),
            ));
        };

        let structure_factor = self.accumulator.structure_factor(num_scatterers);
        let mut rows = ResultTable::new();
        for (bin, s_q) in structure_factor.iter().enumerate() {
            rows.push_row(vec![
                table.magnitude(bin),
                *s_q,
                self.accumulator.samples()[bin],
            ])?;
        }

        let path = result_file_path(&self.config.dst_dir, system.name(), SCATTERING_SUFFIX);
        write_result_file(&path, &rows, "Molecular Scattering Function\nq    S(q)   samples")?;
        info!("Scattering function written to {}", path.display());
        self.output_path = Some(path);
        Ok(())
    }
}
