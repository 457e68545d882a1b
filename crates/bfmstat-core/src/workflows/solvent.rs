use super::ConfigurationReport;
use crate::core::models::species::{CHAIN, COSOLVENT, COSOLVENT_ALT};
use crate::core::models::system::LatticeSystem;
use crate::engine::analyzers::write_bfm::WriteBfmAnalyzer;
use crate::engine::config::SolventConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::task_manager::TaskManager;
use crate::engine::updaters::add_linear_chains::AddLinearChainsUpdater;
use crate::engine::utils::sampling::{child_rng, seeded_rng};
use tracing::{info, instrument};

/// Builds a starting configuration of polymer chains plus two co-solvent species and
/// writes it to the configured BFM file.
///
/// Chain monomers carry tag 1; the two co-solvents are single monomers with tags 3 and 4.
#[instrument(skip_all, name = "solvent_workflow")]
pub fn run(
    config: &SolventConfig,
    seed: Option<u64>,
    reporter: &ProgressReporter,
) -> Result<ConfigurationReport, EngineError> {
    let (mut rng, seed) = seeded_rng(seed);
    let mut system = LatticeSystem::new(config.output_path.to_string_lossy(), config.box_dims);
    info!(
        chains = config.num_chains,
        chain_length = config.chain_length,
        cosolvent_1 = config.cosolvent_1,
        cosolvent_2 = config.cosolvent_2,
        "Creating solvent configuration."
    );

    reporter.report(Progress::PhaseStart { name: "Placement" });
    let mut manager = TaskManager::new();
    manager.add_updater(AddLinearChainsUpdater::new(
        config.num_chains,
        config.chain_length,
        CHAIN,
        CHAIN,
        child_rng(&mut rng),
    ))?;
    manager.add_updater(AddLinearChainsUpdater::new(
        config.cosolvent_1,
        1,
        COSOLVENT,
        COSOLVENT,
        child_rng(&mut rng),
    ))?;
    manager.add_updater(AddLinearChainsUpdater::new(
        config.cosolvent_2,
        1,
        COSOLVENT_ALT,
        COSOLVENT_ALT,
        child_rng(&mut rng),
    ))?;
    manager.add_analyzer(WriteBfmAnalyzer::new(&config.output_path))?;
    manager.initialize(&mut system)?;
    manager.run(&mut system, Some(1), reporter)?;
    manager.cleanup(&mut system)?;
    reporter.report(Progress::PhaseFinish);

    Ok(ConfigurationReport {
        output_path: config.output_path.clone(),
        particles: system.len(),
        bonds: system.bonds().len(),
        seed: Some(seed),
    })
}
