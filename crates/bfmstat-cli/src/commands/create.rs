use crate::cli::CreateSolventArgs;
use crate::config::{self, file::FileConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use bfmstat::engine::progress::ProgressReporter;
use bfmstat::workflows;
use tracing::info;

pub fn run(args: CreateSolventArgs, file_config: &FileConfig) -> Result<()> {
    let (config, seed) = config::build_solvent_config(&args, file_config)?;

    println!("outfile:        {}", config.output_path.display());
    println!("Number of CS 1: {}", config.cosolvent_1);
    println!("Number of CS 2: {}", config.cosolvent_2);
    println!("Chain length:   {}", config.chain_length);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the solvent creation workflow...");
    let report = workflows::solvent::run(&config, seed, &reporter)?;

    if let Some(seed) = report.seed {
        println!("  Random seed: {}", seed);
    }
    println!(
        "✓ {} particles with {} bonds written to: {}",
        report.particles,
        report.bonds,
        report.output_path.display()
    );
    Ok(())
}
