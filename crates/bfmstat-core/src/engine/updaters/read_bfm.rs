use crate::core::io::bfm::{BfmError, BfmReader};
use crate::core::models::system::LatticeSystem;
use crate::engine::error::EngineError;
use crate::engine::traits::Updater;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Feeds the snapshots of a BFM file into the system one at a time.
///
/// `initialize` loads the header and the first snapshot; every `execute` loads the next
/// one. The run ends at the end of the file or, with a maximum age set, at the first
/// snapshot older than it.
pub struct ReadBfmUpdater {
    path: PathBuf,
    max_age: Option<u64>,
    reader: Option<BfmReader<BufReader<File>>>,
    snapshots_read: usize,
}

impl ReadBfmUpdater {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: None,
            reader: None,
            snapshots_read: 0,
        }
    }

    pub fn with_max_age(mut self, max_age: Option<u64>) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshots_read(&self) -> usize {
        self.snapshots_read
    }
}

impl Updater for ReadBfmUpdater {
    fn name(&self) -> &'static str {
        "ReadBfmUpdater"
    }

    fn initialize(&mut self, system: &mut LatticeSystem) -> Result<(), EngineError> {
        info!("Reading configurations from {}", self.path.display());
        let mut reader = BfmReader::open(&self.path)?;
        system.set_name(self.path.to_string_lossy());
        if !reader.read_next(system)? {
            return Err(BfmError::MissingRecord("!mcs".into()).into());
        }
        debug!(age = system.age(), particles = system.len(), "First snapshot loaded.");
        self.snapshots_read = reader.snapshots_read();
        self.reader = Some(reader);
        Ok(())
    }

    fn execute(&mut self, system: &mut LatticeSystem) -> Result<bool, EngineError> {
        let Some(reader) = self.reader.as_mut() else {
            return Err(EngineError::Internal(
                "BFM reader executed before initialization".into(),
            ));
        };
        let more = reader.read_next(system)?;
        self.snapshots_read = reader.snapshots_read();
        if !more {
            debug!("End of {} reached.", self.path.display());
            return Ok(false);
        }
        if let Some(max_age) = self.max_age {
            if system.age() > max_age {
                info!(
                    age = system.age(),
                    max_age, "Snapshot is beyond the maximum age, stopping."
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn cleanup(&mut self, _system: &mut LatticeSystem) -> Result<(), EngineError> {
        info!(snapshots = self.snapshots_read(), "Finished reading {}", self.path.display());
        self.reader = None;
        Ok(())
    }
}
