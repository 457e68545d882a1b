use super::AnalysisReport;
use crate::core::models::system::LatticeSystem;
use crate::engine::analyzers::nn_shell_contacts::NnShellContactAnalyzer;
use crate::engine::config::ContactConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::task_manager::TaskManager;
use crate::engine::updaters::read_bfm::ReadBfmUpdater;
use std::path::Path;
use tracing::{info, instrument};

/// Counts nearest-neighbour shell contacts over every snapshot of `input`.
#[instrument(skip_all, name = "contacts_workflow", fields(input = %input.display()))]
pub fn run(
    input: &Path,
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisReport, EngineError> {
    let mut reader = ReadBfmUpdater::new(input).with_max_age(config.max_mcs);
    let mut analyzer = NnShellContactAnalyzer::new(config.clone());
    let mut system = LatticeSystem::default();

    reporter.report(Progress::PhaseStart { name: "Reading" });
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

    info!(
        snapshots = reader.snapshots_read(),
        samples = analyzer.samples(),
        "Shell contact analysis finished."
    );
    Ok(AnalysisReport {
        snapshots_read: reader.snapshots_read(),
        cycles,
        samples: analyzer.samples(),
        output_path: analyzer.output_path().map(Path::to_path_buf),
        seed: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ContactConfigBuilder;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    const TRAJECTORY: &str = "\
!number_of_monomers=3
!box_x=16
!box_y=16
!box_z=16
!attributes
1-2:1
3-3:3

!mcs=0
0 0 0
4 0 0
10 10 10

!mcs=100
0 0 0
4 0 0
2 0 0

!mcs=200
0 0 0
4 0 0
2 1 0
";

    #[test]
    fn analyses_every_snapshot_after_the_first() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("run_00.bfm");
        fs::write(&input, TRAJECTORY).unwrap();
        let config = ContactConfigBuilder::new()
            .dst_dir(dir.path().to_path_buf())
            .build()
            .unwrap();

        let report = run(&input, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(report.snapshots_read, 3);
        assert_eq!(report.cycles, 2);
        assert_eq!(report.samples, 2);
        let output = dir.path().join("run_00_AnalyzerCounterNNShellContacts.dat");
        assert_eq!(report.output_path.as_deref(), Some(output.as_path()));
        let content = fs::read_to_string(&output).unwrap();
        assert!(content.ends_with("1\t1\t1\t1\t1\n"));
    }

    #[test]
    fn reports_snapshot_count_before_finishing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("run_02.bfm");
        fs::write(&input, TRAJECTORY).unwrap();
        let config = ContactConfigBuilder::new()
            .dst_dir(dir.path().to_path_buf())
            .build()
            .unwrap();

        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(msg) = event {
                messages.lock().unwrap().push(msg);
            }
        }));
        run(&input, &config, &reporter).unwrap();
        drop(reporter);

        let messages = messages.into_inner().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("3 snapshots read from "));
    }

    #[test]
    fn max_mcs_stops_before_later_snapshots() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("run_01.bfm");
        fs::write(&input, TRAJECTORY).unwrap();
        let config = ContactConfigBuilder::new()
            .dst_dir(dir.path().to_path_buf())
            .max_mcs(Some(150))
            .build()
            .unwrap();

        let report = run(&input, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(report.cycles, 1);
        assert_eq!(report.samples, 1);
    }
}
