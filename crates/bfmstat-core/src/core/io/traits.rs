use crate::core::models::system::LatticeSystem;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing lattice configuration formats.
///
/// Whole-file reads return the system positioned at the *last* snapshot the file
/// contains. Formats that carry several snapshots additionally offer a stepwise reader.
pub trait ConfigurationFile {
    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Reads a complete configuration from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the reader cannot be read.
    fn read_from(reader: &mut impl BufRead) -> Result<LatticeSystem, Self::Error>;

    /// Writes the current state of `system` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(system: &LatticeSystem, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a configuration from a file path. The system is named after the path.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<LatticeSystem, Self::Error> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut system = Self::read_from(&mut reader)?;
        system.set_name(path.as_ref().to_string_lossy());
        Ok(system)
    }

    /// Writes a configuration to a file path, overwriting any existing file.
    fn write_to_path<P: AsRef<Path>>(system: &LatticeSystem, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(system, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
