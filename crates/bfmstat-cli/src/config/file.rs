use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileContactsConfig {
    #[serde(rename = "output-dir")]
    pub output_dir: Option<PathBuf>,
    #[serde(rename = "start-time")]
    pub start_time: Option<u64>,
    #[serde(rename = "max-mcs")]
    pub max_mcs: Option<u64>,
    #[serde(rename = "save-mcs")]
    pub save_mcs: Option<u64>,
    #[serde(rename = "number-cosolvent")]
    pub number_cosolvent: Option<usize>,
    pub epsilon: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileScatteringConfig {
    #[serde(rename = "output-dir")]
    pub output_dir: Option<PathBuf>,
    #[serde(rename = "evaluation-time")]
    pub evaluation_time: Option<u64>,
    #[serde(rename = "relax-time")]
    pub relax_time: Option<u64>,
    #[serde(rename = "num-q")]
    pub num_q: Option<usize>,
    pub directions: Option<usize>,
    #[serde(rename = "q-min")]
    pub q_min: Option<f64>,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileSolventConfig {
    #[serde(rename = "box")]
    pub box_length: Option<i32>,
    pub chains: Option<usize>,
    pub seed: Option<u64>,
}

/// Parameters read from the optional `--config` TOML file, one table per subcommand.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub contacts: FileContactsConfig,
    #[serde(default)]
    pub scattering: FileScatteringConfig,
    #[serde(default, rename = "create-solvent")]
    pub create_solvent: FileSolventConfig,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sections_are_optional_and_parsed_independently() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.toml");
        fs::write(
            &path,
            r#"
            [scattering]
            num-q = 50
            q-min = 0.2
            output-dir = "results"

            [create-solvent]
            box = 32
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        assert_eq!(config.contacts, FileContactsConfig::default());
        assert_eq!(config.scattering.num_q, Some(50));
        assert_eq!(config.scattering.q_min, Some(0.2));
        assert_eq!(config.scattering.output_dir, Some(PathBuf::from("results")));
        assert_eq!(config.create_solvent.box_length, Some(32));
        assert_eq!(config.create_solvent.seed, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.toml");
        fs::write(&path, "[contacts]\nstart_time = 10\n").unwrap();

        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = FileConfig::from_file(Path::new("/nonexistent/params.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
