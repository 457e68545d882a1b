use crate::core::io::results::{ResultTable, result_file_path, write_result_file};
use crate::core::models::snapshot::Snapshot;
use crate::core::models::species::{CHAIN, COSOLVENT};
use crate::core::models::system::LatticeSystem;
use crate::core::statistics::StatisticMoment;
use crate::core::utils::periodic::folded_distance_squared;
use crate::engine::config::ContactConfig;
use crate::engine::error::EngineError;
use crate::engine::traits::Analyzer;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Squared lattice distance bounding the nearest-neighbour shell of a BFM monomer.
pub const NN_SHELL_SQUARED_DISTANCE: i32 = 6;

pub const CONTACTS_SUFFIX: &str = "AnalyzerCounterNNShellContacts";

/// Shell statistics of one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShellContacts {
    /// Co-solvent particles touching at least one chain monomer.
    pub in_shell: u32,
    /// Co-solvent particles touching two or more chain monomers. Always `<= in_shell`.
    pub bridges: u32,
}

/// Counts co-solvent particles in the nearest-neighbour shell of the polymer.
///
/// For every co-solvent particle the chain monomers within the shell are counted under
/// minimum-image folding. The scan is a pure function of positions and tags.
pub fn count_shell_contacts<S: Snapshot + ?Sized>(snapshot: &S) -> ShellContacts {
    let dims = snapshot.box_dims();
    let particles = snapshot.particles();
    let mut contacts = ShellContacts::default();

    for probe in particles.iter().filter(|p| p.has_tag(COSOLVENT)) {
        let neighbours = particles
            .iter()
            .filter(|target| target.has_tag(CHAIN))
            .filter(|target| {
                folded_distance_squared(probe.position - target.position, dims)
                    <= NN_SHELL_SQUARED_DISTANCE
            })
            .count();

        if neighbours > 0 {
            contacts.in_shell += 1;
        }
        if neighbours > 1 {
            contacts.bridges += 1;
        }
    }
    contacts
}

/// Accumulates shell and bridge counts over every eligible snapshot.
pub struct NnShellContactAnalyzer {
    config: ContactConfig,
    in_shell: StatisticMoment,
    bridges: StatisticMoment,
    output_path: Option<PathBuf>,
}

impl NnShellContactAnalyzer {
    pub fn new(config: ContactConfig) -> Self {
        Self {
            config,
            in_shell: StatisticMoment::new(),
            bridges: StatisticMoment::new(),
            output_path: None,
        }
    }

    /// A snapshot is eligible once `age >= start_time` and, with a stride set, when its
    /// age is a multiple of the stride.
    pub fn is_eligible(&self, age: u64) -> bool {
        age >= self.config.start_time
            && (self.config.save_interval == 0 || age % self.config.save_interval == 0)
    }

    pub fn samples(&self) -> u64 {
        self.in_shell.count()
    }

    pub fn in_shell_statistics(&self) -> &StatisticMoment {
        &self.in_shell
    }

    pub fn bridge_statistics(&self) -> &StatisticMoment {
        &self.bridges
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    fn header(&self) -> String {
        let mut comment = String::from(
            "File produced by analyzer AnalyzerCounterNNShellContacts\n\
             Analyze co-solvent polymer bridges\n\
             eta: number of co-solvent in the NN shell of the polymer\n\
             gamma: number of co-solvent bridging two or more polymer monomers\n",
        );
        if let Some(epsilon) = self.config.nn_interaction {
            comment.push_str(&format!("NN shell interaction epsilon: {}\n", epsilon));
        }
        comment.push_str("\nnumCoSolvent\t<eta>\t<eta^2>\t<gamma>\t<gamma^2>\n");
        comment
    }
}

impl Analyzer for NnShellContactAnalyzer {
    fn name(&self) -> &'static str {
        "NnShellContactAnalyzer"
    }

    fn initialize(&mut self, system: &LatticeSystem) -> Result<(), EngineError> {
        self.in_shell.reset();
        self.bridges.reset();

        let found = system.count_tagged(COSOLVENT);
        if let Some(expected) = self.config.expected_cosolvent {
            if expected != found {
                warn!(
                    expected,
                    found, "Co-solvent count in the configuration differs from the expected one."
                );
            }
        }
        info!(
            cosolvent = found,
            start_time = self.config.start_time,
            "Shell contact analyzer ready."
        );
        Ok(())
    }

    #[instrument(skip_all, name = "nn_shell_contacts_execute", fields(age = system.age()))]
    fn execute(&mut self, system: &LatticeSystem) -> Result<bool, EngineError> {
        if !self.is_eligible(system.age()) {
            debug!("Snapshot not eligible, skipping.");
            return Ok(true);
        }

        let contacts = count_shell_contacts(system);
        debug!(
            in_shell = contacts.in_shell,
            bridges = contacts.bridges,
            "Counted shell contacts."
        );
        self.in_shell.add_value(f64::from(contacts.in_shell));
        self.bridges.add_value(f64::from(contacts.bridges));
        Ok(true)
    }

    fn cleanup(&mut self, system: &LatticeSystem) -> Result<(), EngineError> {
        if self.in_shell.is_empty() {
            info!(
                "No snapshot reached the start time {}; no result file written.",
                self.config.start_time
            );
            return Ok(());
        }

        let num_cosolvent = system.count_tagged(COSOLVENT) as f64;
        let mut table = ResultTable::new();
        table.push_row(vec![
            num_cosolvent,
            self.in_shell.mean()?,
            self.in_shell.mean_square()?,
            self.bridges.mean()?,
            self.bridges.mean_square()?,
        ])?;

        let path = result_file_path(&self.config.dst_dir, system.name(), CONTACTS_SUFFIX);
        write_result_file(&path, &table, &self.header())?;
        info!(
            samples = self.in_shell.count(),
            "Shell contact results written to {}",
            path.display()
        );
        self.output_path = Some(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::particle::Particle;
    use crate::core::models::species::SOLVENT;
    use crate::core::models::system::BoxDims;
    use crate::engine::config::ContactConfigBuilder;
    use tempfile::tempdir;

    fn system_with(particles: &[Particle], box_length: i32) -> LatticeSystem {
        let mut system = LatticeSystem::new("run_00.bfm", BoxDims::cubic(box_length));
        for particle in particles {
            system.add_particle(*particle);
        }
        system
    }

    fn config(dst_dir: &Path, start_time: u64) -> ContactConfig {
        ContactConfigBuilder::new()
            .dst_dir(dst_dir.to_path_buf())
            .start_time(start_time)
            .build()
            .unwrap()
    }

    #[test]
    fn single_cosolvent_within_shell_counts_once_without_bridge() {
        let system = system_with(
            &[
                Particle::at(0, 0, 0, CHAIN),
                Particle::at(2, 0, 0, COSOLVENT),
            ],
            10,
        );
        let contacts = count_shell_contacts(&system);
        assert_eq!(
            contacts,
            ShellContacts {
                in_shell: 1,
                bridges: 0
            }
        );
    }

    #[test]
    fn contacts_across_periodic_boundary_are_found() {
        let system = system_with(
            &[
                Particle::at(0, 0, 0, CHAIN),
                Particle::at(9, 9, 0, COSOLVENT),
            ],
            10,
        );
        assert_eq!(count_shell_contacts(&system).in_shell, 1);
    }

    #[test]
    fn cosolvent_next_to_two_monomers_is_a_bridge() {
        let system = system_with(
            &[
                Particle::at(0, 0, 0, CHAIN),
                Particle::at(4, 0, 0, CHAIN),
                Particle::at(2, 0, 0, COSOLVENT),
                Particle::at(20, 20, 20, COSOLVENT),
            ],
            32,
        );
        let contacts = count_shell_contacts(&system);
        assert_eq!(
            contacts,
            ShellContacts {
                in_shell: 1,
                bridges: 1
            }
        );
    }

    #[test]
    fn distance_beyond_shell_and_other_species_are_ignored() {
        let system = system_with(
            &[
                Particle::at(0, 0, 0, CHAIN),
                Particle::at(2, 1, 1, COSOLVENT),
                Particle::at(2, 2, 0, COSOLVENT),
                Particle::at(0, 2, 0, SOLVENT),
                Particle::at(2, 0, 0, 4),
            ],
            16,
        );
        let contacts = count_shell_contacts(&system);
        assert_eq!(contacts.in_shell, 1);
        assert_eq!(contacts.bridges, 0);
    }

    #[test]
    fn scan_is_deterministic_and_bridges_never_exceed_shell_count() {
        let mut particles = Vec::new();
        for i in 0..8 {
            particles.push(Particle::at(2 * i, 0, 0, CHAIN));
        }
        for i in 0..8 {
            particles.push(Particle::at(2 * i + 1, 2, (i % 3) - 1, COSOLVENT));
        }
        let system = system_with(&particles, 16);

        let first = count_shell_contacts(&system);
        let second = count_shell_contacts(&system);
        assert_eq!(first, second);
        assert!(first.bridges <= first.in_shell);
        assert!(first.in_shell > 0);
    }

    #[test]
    fn snapshots_before_start_time_are_not_sampled() {
        let dir = tempdir().unwrap();
        let mut analyzer = NnShellContactAnalyzer::new(config(dir.path(), 500));
        let mut system = system_with(
            &[
                Particle::at(0, 0, 0, CHAIN),
                Particle::at(2, 0, 0, COSOLVENT),
            ],
            10,
        );

        analyzer.initialize(&system).unwrap();
        system.set_age(100);
        assert!(analyzer.execute(&system).unwrap());
        assert_eq!(analyzer.samples(), 0);

        system.set_age(500);
        assert!(analyzer.execute(&system).unwrap());
        assert_eq!(analyzer.samples(), 1);
    }

    #[test]
    fn stride_restricts_eligible_ages() {
        let dir = tempdir().unwrap();
        let config = ContactConfigBuilder::new()
            .dst_dir(dir.path().to_path_buf())
            .save_interval(1000)
            .build()
            .unwrap();
        let analyzer = NnShellContactAnalyzer::new(config);
        assert!(analyzer.is_eligible(0));
        assert!(!analyzer.is_eligible(1500));
        assert!(analyzer.is_eligible(2000));
    }

    #[test]
    fn cleanup_writes_moments_row_to_named_result_file() {
        let dir = tempdir().unwrap();
        let mut analyzer = NnShellContactAnalyzer::new(config(dir.path(), 0));
        let mut system = system_with(
            &[
                Particle::at(0, 0, 0, CHAIN),
                Particle::at(4, 0, 0, CHAIN),
                Particle::at(2, 0, 0, COSOLVENT),
                Particle::at(12, 12, 12, COSOLVENT),
            ],
            32,
        );

        analyzer.initialize(&system).unwrap();
        analyzer.execute(&system).unwrap();
        system.particles_mut()[2].position.x = 20;
        system.set_age(100);
        analyzer.execute(&system).unwrap();
        analyzer.cleanup(&system).unwrap();

        let path = dir.path().join("run_00_AnalyzerCounterNNShellContacts.dat");
        assert_eq!(analyzer.output_path(), Some(path.as_path()));
        let content = std::fs::read_to_string(&path).unwrap();
        let data: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(data, vec!["2\t0.5\t0.5\t0.5\t0.5"]);
        assert!(content.contains("# numCoSolvent\t<eta>\t<eta^2>\t<gamma>\t<gamma^2>"));
    }

    #[test]
    fn cleanup_without_samples_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut analyzer = NnShellContactAnalyzer::new(config(dir.path(), 1_000_000));
        let system = system_with(&[Particle::at(0, 0, 0, CHAIN)], 10);

        analyzer.initialize(&system).unwrap();
        analyzer.execute(&system).unwrap();
        analyzer.cleanup(&system).unwrap();

        assert!(analyzer.output_path().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
