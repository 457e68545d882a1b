use super::AnalysisReport;
use crate::core::models::system::LatticeSystem;
use crate::engine::analyzers::scattering::ScatteringAnalyzer;
use crate::engine::config::ScatteringConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::task_manager::TaskManager;
use crate::engine::updaters::read_bfm::ReadBfmUpdater;
use crate::engine::utils::sampling::{child_rng, seeded_rng};
use std::path::Path;
use tracing::{info, instrument};

/// Estimates the isotropic structure factor of the chain monomers in `input`.
///
/// The random directions are drawn from a generator seeded once from `seed`, or from a
/// fresh seed that is reported back.
#[instrument(skip_all, name = "scattering_workflow", fields(input = %input.display()))]
pub fn run(
    input: &Path,
    config: &ScatteringConfig,
    seed: Option<u64>,
    reporter: &ProgressReporter,
) -> Result<AnalysisReport, EngineError> {
    let (mut rng, seed) = seeded_rng(seed);
    let mut reader = ReadBfmUpdater::new(input);
    let mut analyzer = ScatteringAnalyzer::new(config.clone(), child_rng(&mut rng));
    let mut system = LatticeSystem::default();

    reporter.report(Progress::PhaseStart { name: "Sampling" });
    let cycles = {
        let mut manager = TaskManager::new();
        manager.add_updater(&mut reader)?;
        manager.add_analyzer(&mut analyzer)?;
        manager.initialize(&mut system)?;
        let cycles = manager.run(&mut system, None, reporter)?;
        manager.cleanup(&mut system)?;
        cycles
    };
    reporter.report(Progress::Message(format!(
        "{} snapshots read from {}",
        reader.snapshots_read(),
        input.display()
    )));
    reporter.report(Progress::PhaseFinish);

    let samples = analyzer
        .accumulator()
        .samples()
        .first()
        .map_or(0, |&n| n as u64 / config.directions as u64);
    info!(
        executed = analyzer.executed_steps(),
        samples, "Scattering analysis finished."
    );
    Ok(AnalysisReport {
        snapshots_read: reader.snapshots_read(),
        cycles,
        samples,
        output_path: analyzer.output_path().map(Path::to_path_buf),
        seed: Some(seed),
    })
}
