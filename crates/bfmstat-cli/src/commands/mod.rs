pub mod contacts;
pub mod create;
pub mod relabel;
pub mod scattering;

use crate::error::{CliError, Result};
use std::path::Path;

fn require_input_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::Argument(format!(
            "input file '{}' does not exist",
            path.display()
        )))
    }
}
