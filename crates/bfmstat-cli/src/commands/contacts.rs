use super::require_input_file;
use crate::cli::ContactsArgs;
use crate::config::{self, file::FileConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use bfmstat::engine::progress::ProgressReporter;
use bfmstat::workflows;
use tracing::{info, warn};

pub fn run(args: ContactsArgs, file_config: &FileConfig) -> Result<()> {
    require_input_file(&args.input)?;
    let config = config::build_contact_config(&args, file_config)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Counting shell contacts in {}...", args.input.display());
    info!("Invoking the shell contact workflow...");
    let report = workflows::contacts::run(&args.input, &config, &reporter)?;

    match report.output_path {
        Some(path) => println!(
            "✓ {} of {} snapshots analysed, results written to: {}",
            report.samples,
            report.snapshots_read,
            path.display()
        ),
        None => {
            warn!("No snapshot passed the start time; nothing was written.");
            println!(
                "Warning: none of the {} snapshots reached the start time {}; no results written.",
                report.snapshots_read, config.start_time
            );
        }
    }
    Ok(())
}
