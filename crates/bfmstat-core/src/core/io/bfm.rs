use crate::core::io::traits::ConfigurationFile;
use crate::core::models::system::{BoxDims, LatticeSystem, Periodicity};
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

const FORMAT_VERSION: &str = "2.0";

#[derive(Debug, Error)]
pub enum BfmError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: BfmParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum BfmParseErrorKind {
    #[error("Invalid value for '{field}' (value: '{value}')")]
    InvalidValue { field: &'static str, value: String },
    #[error("Invalid attribute record '{0}'. Expected 'first-last:tag'")]
    InvalidAttributeRecord(String),
    #[error("Invalid bond record '{0}'. Expected two monomer indices")]
    InvalidBondRecord(String),
    #[error("Invalid coordinate record '{0}'. Expected 'x y z'")]
    InvalidCoordinates(String),
    #[error("Compressed bond-vector coordinates are not supported: '{0}'")]
    CompressedCoordinates(String),
}

/// Stepwise reader for BFM configuration files.
///
/// Each call to [`BfmReader::read_next`] applies header commands to the system until the
/// next `!mcs` block has been read, so the system always reflects the latest snapshot.
pub struct BfmReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
    snapshots_read: usize,
}

impl BfmReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BfmError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> BfmReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
            snapshots_read: 0,
        }
    }

    /// Number of `!mcs` blocks consumed so far.
    pub fn snapshots_read(&self) -> usize {
        self.snapshots_read
    }

    /// Reads up to and including the next snapshot.
    ///
    /// Returns `Ok(false)` once the end of the input is reached without another snapshot.
    pub fn read_next(&mut self, system: &mut LatticeSystem) -> Result<bool, BfmError> {
        while let Some(line) = self.next_line()? {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some(command) = trimmed.strip_prefix('!') else {
                trace!(line = self.line_num, "Skipping data line outside of a known block.");
                continue;
            };
            let (key, value) = command
                .split_once('=')
                .map(|(k, v)| (k.trim(), v.trim()))
                .unwrap_or((command.trim(), ""));

            match key {
                "number_of_monomers" => {
                    let n = self.parse_value::<usize>("number_of_monomers", value)?;
                    system.resize(n);
                }
                "box_x" | "box_y" | "box_z" => {
                    let length = self.parse_value::<i32>("box", value)?;
                    if length <= 0 {
                        return Err(self.invalid_value("box", value));
                    }
                    let mut dims = system.box_dims();
                    match key {
                        "box_x" => dims.x = length,
                        "box_y" => dims.y = length,
                        _ => dims.z = length,
                    }
                    system.set_box_dims(dims);
                }
                "periodic_x" | "periodic_y" | "periodic_z" => {
                    let flag = match value {
                        "1" | "true" => true,
                        "0" | "false" => false,
                        _ => return Err(self.invalid_value("periodic", value)),
                    };
                    let mut periodicity = system.periodicity();
                    match key {
                        "periodic_x" => periodicity.x = flag,
                        "periodic_y" => periodicity.y = flag,
                        _ => periodicity.z = flag,
                    }
                    system.set_periodicity(periodicity);
                }
                "attributes" => self.read_attributes(system)?,
                "bonds" => self.read_bonds(system)?,
                "mcs" => {
                    let age = self.parse_value::<u64>("mcs", value)?;
                    self.read_positions(system)?;
                    system.set_age(age);
                    self.snapshots_read += 1;
                    debug!(age, snapshot = self.snapshots_read, "Read BFM snapshot.");
                    return Ok(true);
                }
                other => debug!("Skipping unsupported BFM command '!{}'.", other),
            }
        }
        Ok(false)
    }

    fn next_line(&mut self) -> Result<Option<String>, BfmError> {
        match self.lines.next() {
            Some(line) => {
                self.line_num += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    /// Reads the lines of a block up to the next blank line or end of input.
    fn next_block_line(&mut self) -> Result<Option<String>, BfmError> {
        match self.next_line()? {
            Some(line) if !line.trim().is_empty() => Ok(Some(line)),
            _ => Ok(None),
        }
    }

    fn read_attributes(&mut self, system: &mut LatticeSystem) -> Result<(), BfmError> {
        while let Some(line) = self.next_block_line()? {
            let record = line.trim();
            let parsed = record.split_once(':').and_then(|(range, tag)| {
                let (first, last) = range.split_once('-')?;
                Some((
                    first.trim().parse::<usize>().ok()?,
                    last.trim().parse::<usize>().ok()?,
                    tag.trim().parse::<i32>().ok()?,
                ))
            });
            let Some((first, last, tag)) = parsed else {
                return Err(self.parse_error(BfmParseErrorKind::InvalidAttributeRecord(
                    record.to_string(),
                )));
            };
            if first == 0 || first > last || last > system.len() {
                return Err(BfmError::Inconsistency(format!(
                    "Attribute range {}-{} on line {} exceeds the {} declared monomers",
                    first,
                    last,
                    self.line_num,
                    system.len()
                )));
            }
            system.set_tags(first - 1..last, tag);
        }
        Ok(())
    }

    fn read_bonds(&mut self, system: &mut LatticeSystem) -> Result<(), BfmError> {
        while let Some(line) = self.next_block_line()? {
            let record = line.trim();
            let indices: Vec<usize> = record
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<_, _>>()
                .map_err(|_| {
                    self.parse_error(BfmParseErrorKind::InvalidBondRecord(record.to_string()))
                })?;
            let [i, j] = indices[..] else {
                return Err(self.parse_error(BfmParseErrorKind::InvalidBondRecord(
                    record.to_string(),
                )));
            };
            if i == 0 || j == 0 || !system.add_bond(i - 1, j - 1) {
                return Err(BfmError::Inconsistency(format!(
                    "Bond '{}' on line {} refers to an unknown monomer or repeats a bond",
                    record, self.line_num
                )));
            }
        }
        Ok(())
    }

    fn read_positions(&mut self, system: &mut LatticeSystem) -> Result<(), BfmError> {
        let expected = system.len();
        if expected == 0 {
            return Err(BfmError::MissingRecord("!number_of_monomers".into()));
        }
        for index in 0..expected {
            let Some(line) = self.next_block_line()? else {
                return Err(BfmError::Inconsistency(format!(
                    "!mcs block ended after {} of {} monomers",
                    index, expected
                )));
            };
            let record = line.trim();
            let tokens: Vec<&str> = record.split_whitespace().collect();
            if tokens.len() > 3 {
                return Err(self.parse_error(BfmParseErrorKind::CompressedCoordinates(
                    record.to_string(),
                )));
            }
            let coords: Vec<i32> = tokens
                .iter()
                .map(|t| t.parse::<i32>())
                .collect::<Result<_, _>>()
                .map_err(|_| {
                    self.parse_error(BfmParseErrorKind::InvalidCoordinates(record.to_string()))
                })?;
            let [x, y, z] = coords[..] else {
                return Err(self.parse_error(BfmParseErrorKind::InvalidCoordinates(
                    record.to_string(),
                )));
            };
            system.particles_mut()[index].position = Point3::new(x, y, z);
        }
        Ok(())
    }

    fn parse_value<T: std::str::FromStr>(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<T, BfmError> {
        value.parse().map_err(|_| self.invalid_value(field, value))
    }

    fn invalid_value(&self, field: &'static str, value: &str) -> BfmError {
        self.parse_error(BfmParseErrorKind::InvalidValue {
            field,
            value: value.to_string(),
        })
    }

    fn parse_error(&self, kind: BfmParseErrorKind) -> BfmError {
        BfmError::Parse {
            line: self.line_num,
            kind,
        }
    }
}

/// Whole-file access to BFM configurations.
pub struct BfmFile;

impl ConfigurationFile for BfmFile {
    type Error = BfmError;

    fn read_from(reader: &mut impl BufRead) -> Result<LatticeSystem, Self::Error> {
        let mut stepwise = BfmReader::new(reader);
        let mut system = LatticeSystem::default();
        while stepwise.read_next(&mut system)? {}
        if stepwise.snapshots_read() == 0 {
            return Err(BfmError::MissingRecord("!mcs".into()));
        }
        Ok(system)
    }

    fn write_to(system: &LatticeSystem, writer: &mut impl Write) -> Result<(), Self::Error> {
        let dims: BoxDims = system.box_dims();
        let periodicity: Periodicity = system.periodicity();

        writeln!(writer, "#!version={}", FORMAT_VERSION)?;
        writeln!(writer, "!number_of_monomers={}", system.len())?;
        writeln!(writer, "!box_x={}", dims.x)?;
        writeln!(writer, "!box_y={}", dims.y)?;
        writeln!(writer, "!box_z={}", dims.z)?;
        writeln!(writer, "!periodic_x={}", u8::from(periodicity.x))?;
        writeln!(writer, "!periodic_y={}", u8::from(periodicity.y))?;
        writeln!(writer, "!periodic_z={}", u8::from(periodicity.z))?;
        writeln!(writer)?;

        if !system.is_empty() {
            writeln!(writer, "!attributes")?;
            let particles = system.particles();
            let mut run_start = 0;
            for i in 1..=particles.len() {
                if i == particles.len() || particles[i].tag != particles[run_start].tag {
                    writeln!(writer, "{}-{}:{}", run_start + 1, i, particles[run_start].tag)?;
                    run_start = i;
                }
            }
            writeln!(writer)?;
        }

        if !system.bonds().is_empty() {
            writeln!(writer, "!bonds")?;
            for bond in system.bonds() {
                writeln!(writer, "{} {}", bond.a + 1, bond.b + 1)?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "!mcs={}", system.age())?;
        for particle in system.particles() {
            let p = particle.position;
            writeln!(writer, "{} {} {}", p.x, p.y, p.z)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}
