//! `arbor build`: one build cycle, non-zero exit on failure.

use crate::build::BuildCoordinator;
use crate::cli::BuildArgs;
use crate::config::{ConfigOverrides, ProjectPaths};
use crate::error::{BuildError, Result};
use crate::mode::AppMode;
use crate::ui;

/// Execute the build command.
///
/// # Errors
///
/// Returns errors for invalid configuration and `BuildError::Failed` when
/// the cycle does not succeed.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let (config, cwd) = super::load_project(&args.project, &ConfigOverrides::default())?;

    let mode = AppMode::from_env();
    let paths = ProjectPaths::resolve(&config, &cwd, mode);
    tracing::debug!(?paths, %mode, "resolved project paths");

    if args.clean {
        ui::info(&format!("Cleaning output directory: {}", paths.out_dir.display()));
    }
    ui::info("Building app");

    let coordinator = BuildCoordinator::from_config(&config, &paths, mode)?.with_clean(args.clean);
    let (success, elapsed) = coordinator.build_timed().await;
    if !success {
        return Err(BuildError::Failed {
            duration: ui::format_duration(elapsed),
        }
        .into());
    }
    Ok(())
}
