//! `arbor build` and `arbor dev`. Both resolve the project the same way
//! through [`load_project`] before doing anything else.

pub mod build;
pub mod dev;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use dev::execute as dev_execute;

use crate::cli::ProjectArgs;
use crate::config::{ArborConfig, ConfigOverrides};
use crate::error::Result;
use std::path::PathBuf;

/// Load and validate the configuration, returning it with the project root.
///
/// The config file is looked up in `--cwd` (or the process directory); its
/// own `cwd` field, when set, moves the project root relative to that.
pub(crate) fn load_project(
    project: &ProjectArgs,
    overrides: &ConfigOverrides,
) -> Result<(ArborConfig, PathBuf)> {
    let base = utils::project_dir(project.cwd.as_deref())?;
    let config = ArborConfig::load(&base, project.config.as_deref(), overrides)?;
    config.validate()?;

    let root = match &config.cwd {
        Some(dir) => utils::project_dir(Some(&utils::resolve_path(dir, &base)))?,
        None => base,
    };
    tracing::debug!(root = %root.display(), "project root");
    Ok((config, root))
}
