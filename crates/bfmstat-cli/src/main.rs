mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("🚀 bfmstat v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let file_config = config::load_file_config(cli.config.as_deref())?;

    let command_result = match cli.command {
        Commands::Contacts(args) => {
            info!("Dispatching to 'contacts' command.");
            commands::contacts::run(args, &file_config)
        }
        Commands::Scattering(args) => {
            info!("Dispatching to 'scattering' command.");
            commands::scattering::run(args, &file_config)
        }
        Commands::CreateSolvent(args) => {
            info!("Dispatching to 'create-solvent' command.");
            commands::create::run(args, &file_config)
        }
        Commands::Relabel(args) => {
            info!("Dispatching to 'relabel' command.");
            commands::relabel::run(args)
        }
    };

    match &command_result {
        Ok(()) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }
    command_result
}
