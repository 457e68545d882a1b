use super::require_input_file;
use crate::cli::RelabelArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use bfmstat::engine::progress::ProgressReporter;
use bfmstat::workflows;
use tracing::info;

pub fn run(args: RelabelArgs) -> Result<()> {
    require_input_file(&args.input)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the relabel workflow...");
    let report = workflows::relabel::run(&args.input, &args.output, args.tag, &reporter)?;

    println!(
        "✓ {} particles relabeled as {}, written to: {}",
        report.particles,
        args.tag,
        report.output_path.display()
    );
    Ok(())
}
