//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        // Route errors already carry codes and help text
        CliError::Routes(e) => Report::new(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Build(e) => miette::miette!("{}", e),
        _ => miette::miette!("{}", err),
    }
}
