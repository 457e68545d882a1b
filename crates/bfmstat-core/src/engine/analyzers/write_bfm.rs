use crate::core::io::bfm::BfmFile;
use crate::core::io::traits::ConfigurationFile;
use crate::core::models::system::LatticeSystem;
use crate::engine::error::EngineError;
use crate::engine::traits::Analyzer;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct WriteBfmAnalyzer {
    path: PathBuf,
    writes: usize,
}

impl WriteBfmAnalyzer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writes: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Analyzer for WriteBfmAnalyzer {
    fn name(&self) -> &'static str {
        "WriteBfmAnalyzer"
    }

    fn initialize(&mut self, _system: &LatticeSystem) -> Result<(), EngineError> {
        self.writes = 0;
        Ok(())
    }

    fn execute(&mut self, system: &LatticeSystem) -> Result<bool, EngineError> {
        BfmFile::write_to_path(system, &self.path)?;
        self.writes += 1;
        debug!(age = system.age(), "Configuration written to {}", self.path.display());
        Ok(true)
    }

    fn cleanup(&mut self, _system: &LatticeSystem) -> Result<(), EngineError> {
        info!(
            writes = self.writes,
            "Final configuration stored in {}",
            self.path.display()
        );
        Ok(())
    }
}
