use super::error::EngineError;
use crate::core::models::system::LatticeSystem;

/// A plugin that observes snapshots and accumulates statistics.
///
/// `initialize` is called once before the first cycle, `execute` once per snapshot,
/// `cleanup` once after the last cycle. Analyzers never modify the system.
pub trait Analyzer {
    fn name(&self) -> &'static str;

    fn initialize(&mut self, system: &LatticeSystem) -> Result<(), EngineError>;

    /// Returning `Ok(false)` asks the task manager to stop after the current cycle.
    fn execute(&mut self, system: &LatticeSystem) -> Result<bool, EngineError>;

    fn cleanup(&mut self, system: &LatticeSystem) -> Result<(), EngineError>;
}

/// A plugin that produces or modifies the configuration the analyzers observe.
pub trait Updater {
    fn name(&self) -> &'static str;

    fn initialize(&mut self, system: &mut LatticeSystem) -> Result<(), EngineError>;

    /// Returning `Ok(false)` signals that no further snapshot can be produced; the
    /// analyzers are not executed for that cycle.
    fn execute(&mut self, system: &mut LatticeSystem) -> Result<bool, EngineError>;

    fn cleanup(&mut self, system: &mut LatticeSystem) -> Result<(), EngineError>;
}

impl<T: Analyzer + ?Sized> Analyzer for &mut T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn initialize(&mut self, system: &LatticeSystem) -> Result<(), EngineError> {
        (**self).initialize(system)
    }

    fn execute(&mut self, system: &LatticeSystem) -> Result<bool, EngineError> {
        (**self).execute(system)
    }

    fn cleanup(&mut self, system: &LatticeSystem) -> Result<(), EngineError> {
        (**self).cleanup(system)
    }
}

impl<T: Updater + ?Sized> Updater for &mut T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn initialize(&mut self, system: &mut LatticeSystem) -> Result<(), EngineError> {
        (**self).initialize(system)
    }

    fn execute(&mut self, system: &mut LatticeSystem) -> Result<bool, EngineError> {
        (**self).execute(system)
    }

    fn cleanup(&mut self, system: &mut LatticeSystem) -> Result<(), EngineError> {
        (**self).cleanup(system)
    }
}
