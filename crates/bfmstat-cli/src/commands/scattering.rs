use super::require_input_file;
use crate::cli::ScatteringArgs;
use crate::config::{self, file::FileConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use bfmstat::engine::progress::ProgressReporter;
use bfmstat::workflows;
use tracing::{info, warn};

pub fn run(args: ScatteringArgs, file_config: &FileConfig) -> Result<()> {
    require_input_file(&args.input)?;
    let (config, seed) = config::build_scattering_config(&args, file_config)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Sampling the scattering function of {}...", args.input.display());
    info!("Invoking the scattering workflow...");
    let report = workflows::scattering::run(&args.input, &config, seed, &reporter)?;

    if let Some(seed) = report.seed {
        println!("  Random seed: {}", seed);
    }
    match report.output_path {
        Some(path) => println!(
            "✓ {} snapshots sampled, scattering function written to: {}",
            report.samples,
            path.display()
        ),
        None => {
            warn!("Not enough configurations for a scattering function.");
            println!(
                "Warning: {} snapshots read, not enough beyond the relaxation time; no results written.",
                report.snapshots_read
            );
        }
    }
    Ok(())
}
