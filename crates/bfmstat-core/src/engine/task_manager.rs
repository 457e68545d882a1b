use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::state::LifecycleState;
use super::traits::{Analyzer, Updater};
use crate::core::models::system::LatticeSystem;
use tracing::{debug, info, instrument};

/// Drives updaters and analyzers through their lifecycle over one run.
///
/// Each cycle executes every updater in registration order, then every analyzer.
/// The run ends when an updater cannot produce another snapshot, an analyzer asks to
/// stop, or the optional cycle limit is reached.
pub struct TaskManager<'a> {
    updaters: Vec<Box<dyn Updater + 'a>>,
    analyzers: Vec<Box<dyn Analyzer + 'a>>,
    state: LifecycleState,
    cycles: u64,
}

impl<'a> Default for TaskManager<'a> {
    fn default() -> Self {
        Self {
            updaters: Vec::new(),
            analyzers: Vec::new(),
            state: LifecycleState::default(),
            cycles: 0,
        }
    }
}

impl<'a> TaskManager<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn add_updater(&mut self, updater: impl Updater + 'a) -> Result<(), EngineError> {
        self.require(self.state.can_register(), "register an updater")?;
        self.updaters.push(Box::new(updater));
        Ok(())
    }

    pub fn add_analyzer(&mut self, analyzer: impl Analyzer + 'a) -> Result<(), EngineError> {
        self.require(self.state.can_register(), "register an analyzer")?;
        self.analyzers.push(Box::new(analyzer));
        Ok(())
    }

    #[instrument(skip_all, name = "task_manager_initialize")]
    pub fn initialize(&mut self, system: &mut LatticeSystem) -> Result<(), EngineError> {
        self.require(self.state.can_initialize(), "initialize")?;
        for updater in &mut self.updaters {
            debug!("Initializing updater {}", updater.name());
            updater.initialize(system)?;
        }
        for analyzer in &mut self.analyzers {
            debug!("Initializing analyzer {}", analyzer.name());
            analyzer.initialize(system)?;
        }
        self.state = LifecycleState::Initialized;
        Ok(())
    }

    /// Runs cycles until the run ends; returns the number of cycles completed by this call.
    ///
    /// Without a cycle limit at least one updater is required, otherwise the run
    /// could never end.
    #[instrument(skip_all, name = "task_manager_run", fields(max_cycles = ?max_cycles))]
    pub fn run(
        &mut self,
        system: &mut LatticeSystem,
        max_cycles: Option<u64>,
        reporter: &ProgressReporter,
    ) -> Result<u64, EngineError> {
        self.require(self.state.can_run(), "run")?;
        if max_cycles.is_none() && self.updaters.is_empty() {
            return Err(EngineError::Initialization(
                "an unbounded run needs at least one updater to end it".into(),
            ));
        }
        self.state = LifecycleState::Running;

        let mut completed = 0;
        'cycles: while max_cycles.is_none_or(|max| completed < max) {
            for updater in &mut self.updaters {
                if !updater.execute(system)? {
                    info!("Updater {} has no further snapshots.", updater.name());
                    break 'cycles;
                }
            }

            let mut proceed = true;
            for analyzer in &mut self.analyzers {
                if !analyzer.execute(system)? {
                    info!("Analyzer {} requested the run to stop.", analyzer.name());
                    proceed = false;
                }
            }

            completed += 1;
            self.cycles += 1;
            reporter.report(Progress::Snapshot {
                age: system.age(),
                cycle: self.cycles,
            });
            if !proceed {
                break;
            }
        }

        info!(cycles = completed, "Run finished.");
        Ok(completed)
    }

    #[instrument(skip_all, name = "task_manager_cleanup")]
    pub fn cleanup(&mut self, system: &mut LatticeSystem) -> Result<(), EngineError> {
        self.require(self.state.can_cleanup(), "clean up")?;
        self.state = LifecycleState::CleanedUp;
        for updater in &mut self.updaters {
            debug!("Cleaning up updater {}", updater.name());
            updater.cleanup(system)?;
        }
        for analyzer in &mut self.analyzers {
            debug!("Cleaning up analyzer {}", analyzer.name());
            analyzer.cleanup(system)?;
        }
        Ok(())
    }

    fn require(&self, allowed: bool, operation: &'static str) -> Result<(), EngineError> {
        if allowed {
            Ok(())
        } else {
            Err(EngineError::Lifecycle {
                operation,
                state: self.state,
            })
        }
    }
}
