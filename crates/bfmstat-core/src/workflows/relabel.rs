use super::ConfigurationReport;
use crate::core::io::bfm::BfmFile;
use crate::core::io::traits::ConfigurationFile;
use crate::core::models::species::AttributeTag;
use crate::engine::analyzers::write_bfm::WriteBfmAnalyzer;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::task_manager::TaskManager;
use crate::engine::updaters::relabel::RelabelUpdater;
use std::path::Path;
use tracing::instrument;

/// Reads the last snapshot of `input`, gives every particle `tag` and writes the result to
/// `output`.
#[instrument(skip_all, name = "relabel_workflow", fields(tag = tag))]
pub fn run(
    input: &Path,
    output: &Path,
    tag: AttributeTag,
    reporter: &ProgressReporter,
) -> Result<ConfigurationReport, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Relabeling" });
    let mut system = BfmFile::read_from_path(input)?;

    let mut manager = TaskManager::new();
    manager.add_updater(RelabelUpdater::new(tag))?;
    manager.add_analyzer(WriteBfmAnalyzer::new(output))?;
    manager.initialize(&mut system)?;
    manager.run(&mut system, Some(1), reporter)?;
    manager.cleanup(&mut system)?;
    reporter.report(Progress::PhaseFinish);

    Ok(ConfigurationReport {
        output_path: output.to_path_buf(),
        particles: system.len(),
        bonds: system.bonds().len(),
        seed: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn relabels_the_last_snapshot() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.bfm");
        let output = dir.path().join("out.bfm");
        fs::write(
            &input,
            "!number_of_monomers=2\n!box_x=8\n!box_y=8\n!box_z=8\n!attributes\n1-1:1\n2-2:3\n\n\
             !mcs=5\n0 0 0\n2 0 0\n\n!mcs=10\n1 0 0\n3 0 0\n",
        )
        .unwrap();

        let report = run(&input, &output, 2, &ProgressReporter::new()).unwrap();
        assert_eq!(report.particles, 2);

        let system = BfmFile::read_from_path(&output).unwrap();
        assert_eq!(system.age(), 10);
        assert!(system.particles().iter().all(|p| p.tag == 2));
        assert_eq!(system.particles()[0].position.x, 1);
    }
}
