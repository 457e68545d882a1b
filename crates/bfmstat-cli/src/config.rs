pub mod defaults;
pub mod file;

use crate::cli::{ContactsArgs, CreateSolventArgs, ScatteringArgs};
use crate::error::{CliError, Result};
use bfmstat::core::models::system::BoxDims;
use bfmstat::engine::config::{
    ConfigError, ContactConfig, ContactConfigBuilder, ScatteringConfig, ScatteringConfigBuilder,
    SolventConfig, SolventConfigBuilder,
};
use defaults::DefaultsConfig;
use file::FileConfig;
use std::path::Path;
use tracing::debug;

/// Loads the `--config` file if one was given; otherwise every file value is absent.
pub fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

fn config_error(e: ConfigError) -> CliError {
    CliError::Config(e.to_string())
}

/// Command-line flags override the file, which overrides the built-in defaults.
pub fn build_contact_config(args: &ContactsArgs, file: &FileConfig) -> Result<ContactConfig> {
    let defaults = DefaultsConfig::default();
    let section = &file.contacts;

    let config = ContactConfigBuilder::new()
        .dst_dir(
            args.output_dir
                .clone()
                .or_else(|| section.output_dir.clone())
                .unwrap_or(defaults.dst_dir),
        )
        .start_time(
            args.start_time
                .or(section.start_time)
                .unwrap_or(defaults.start_time),
        )
        .max_mcs(args.max_mcs.or(section.max_mcs))
        .save_interval(
            args.save_mcs
                .or(section.save_mcs)
                .unwrap_or(defaults.save_interval),
        )
        .expected_cosolvent(args.number_cosolvent.or(section.number_cosolvent))
        .nn_interaction(args.epsilon.or(section.epsilon))
        .build()
        .map_err(config_error)?;
    debug!("Resolved contact configuration: {:?}", config);
    Ok(config)
}

/// Returns the scattering configuration together with the seed to use, if any.
pub fn build_scattering_config(
    args: &ScatteringArgs,
    file: &FileConfig,
) -> Result<(ScatteringConfig, Option<u64>)> {
    let defaults = DefaultsConfig::default();
    let section = &file.scattering;

    let config = ScatteringConfigBuilder::new()
        .dst_dir(
            args.output_dir
                .clone()
                .or_else(|| section.output_dir.clone())
                .unwrap_or(defaults.dst_dir),
        )
        .evaluation_time(
            args.evaluation_time
                .or(section.evaluation_time)
                .unwrap_or(defaults.evaluation_time),
        )
        .relax_time(
            args.relax_time
                .or(section.relax_time)
                .unwrap_or(defaults.relax_time),
        )
        .num_q(args.num_q.or(section.num_q).unwrap_or(defaults.num_q))
        .directions(
            args.directions
                .or(section.directions)
                .unwrap_or(defaults.directions),
        )
        .q_min(args.q_min.or(section.q_min).unwrap_or(defaults.q_min))
        .build()
        .map_err(config_error)?;
    debug!("Resolved scattering configuration: {:?}", config);
    Ok((config, args.seed.or(section.seed)))
}

pub fn build_solvent_config(
    args: &CreateSolventArgs,
    file: &FileConfig,
) -> Result<(SolventConfig, Option<u64>)> {
    let defaults = DefaultsConfig::default();
    let section = &file.create_solvent;

    let box_length = args
        .box_length
        .or(section.box_length)
        .unwrap_or(defaults.box_length);
    let config = SolventConfigBuilder::new()
        .output_path(args.output.clone())
        .box_dims(BoxDims::cubic(box_length))
        .num_chains(args.chains.or(section.chains).unwrap_or(defaults.num_chains))
        .chain_length(args.chain_length)
        .cosolvent_1(args.cosolvent_1)
        .cosolvent_2(args.cosolvent_2)
        .build()
        .map_err(config_error)?;
    debug!("Resolved solvent configuration: {:?}", config);
    Ok((config, args.seed.or(section.seed)))
}
