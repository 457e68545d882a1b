use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("I/O error while writing results: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to format result rows: {0}")]
    Csv(#[from] csv::Error),
    #[error("Result row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A rectangular table of scalar results, written one row per line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<Vec<f64>>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row. Every row must have as many columns as the first one.
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<(), ResultsError> {
        if let Some(first) = self.rows.first() {
            if first.len() != row.len() {
                return Err(ResultsError::RaggedRow {
                    row: self.rows.len(),
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Strips the directory part and the final extension from a configuration name.
///
/// Both `/` and `\` count as directory separators, so names recorded on either
/// platform produce the same base name.
pub fn config_base_name(name: &str) -> String {
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem)
        .to_owned()
}

/// `<base>_<suffix>.dat` for the configuration `name`.
pub fn result_file_name(name: &str, suffix: &str) -> String {
    format!("{}_{}.dat", config_base_name(name), suffix)
}

/// Full output path of a result file inside `dst_dir`.
pub fn result_file_path(dst_dir: &Path, name: &str, suffix: &str) -> PathBuf {
    dst_dir.join(result_file_name(name, suffix))
}

/// Writes `comment` as `# `-prefixed lines followed by the tab-delimited rows of `table`.
///
/// Creates or overwrites exactly one file. The handle is released when this returns,
/// whether or not the write succeeded.
pub fn write_result_file(
    path: &Path,
    table: &ResultTable,
    comment: &str,
) -> Result<(), ResultsError> {
    info!("Writing results to {}", path.display());
    let mut writer = BufWriter::new(File::create(path)?);
    write_results_to(&mut writer, table, comment)?;
    writer.flush()?;
    Ok(())
}

/// Writer-level counterpart of [`write_result_file`].
pub fn write_results_to(
    writer: &mut impl Write,
    table: &ResultTable,
    comment: &str,
) -> Result<(), ResultsError> {
    for line in comment.lines() {
        if line.is_empty() {
            writeln!(writer, "#")?;
        } else {
            writeln!(writer, "# {}", line)?;
        }
    }

    let mut rows = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    for row in table.rows() {
        rows.write_record(row.iter().map(|value| value.to_string()))?;
    }
    rows.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn base_name_strips_directory_and_extension() {
        assert_eq!(config_base_name("run_00.bfm"), "run_00");
        assert_eq!(config_base_name("/data/sim/run_00.bfm"), "run_00");
        assert_eq!(config_base_name("C:\\sim\\run_00.bfm"), "run_00");
        assert_eq!(config_base_name("archive.tar.gz"), "archive.tar");
        assert_eq!(config_base_name("plain"), "plain");
        assert_eq!(config_base_name("dir/.bfm"), "");
        assert_eq!(config_base_name("run."), "run");
    }

    #[test]
    fn result_file_name_appends_analyzer_suffix() {
        assert_eq!(
            result_file_name("run_00.bfm", "AnalyzerCounterNNShellContacts"),
            "run_00_AnalyzerCounterNNShellContacts.dat"
        );
        assert_eq!(
            result_file_name("out/dendrimer.bfm", "ScatteringFct"),
            "dendrimer_ScatteringFct.dat"
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut table = ResultTable::new();
        table.push_row(vec![1.0, 2.0]).unwrap();
        let result = table.push_row(vec![1.0]);
        assert!(matches!(
            result,
            Err(ResultsError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn result_file_has_comment_block_then_tab_delimited_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.dat");
        let mut table = ResultTable::new();
        table.push_row(vec![10.0, 2.5, 6.25]).unwrap();
        table.push_row(vec![11.0, 3.0, 9.0]).unwrap();

        write_result_file(&path, &table, "first line\n\ncolumns: a b c\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# first line\n#\n# columns: a b c\n10\t2.5\t6.25\n11\t3\t9\n"
        );
    }

    #[test]
    fn unwritable_destination_propagates_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.dat");
        let result = write_result_file(&path, &ResultTable::new(), "");
        assert!(matches!(result, Err(ResultsError::Io(_))));
    }
}
