//! Configuration for Arbor projects.
//!
//! Merged from several sources, lowest to highest priority:
//! defaults < `arbor.config.json` < `ARBOR_*` environment < CLI flags.

mod defaults;
mod loading;
mod paths;
mod tests;
mod types;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;
pub use loading::{env_key_path, ConfigOverrides};
pub use paths::ProjectPaths;
pub use types::*;

/// Arbor configuration, loaded from arbor.config.json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArborConfig {
    /// Client entry point handed to the bundler, relative to the working directory
    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    /// Route root directories; each receives its own generated artifacts
    #[serde(default = "default_routes")]
    pub routes: Vec<PathBuf>,

    /// Directory served by the app; bundles go to `<publicDir>/build`
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Working directory, relative to where arbor was started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    #[serde(default)]
    pub bundler: BundlerConfig,

    #[serde(default)]
    pub formatter: FormatterConfig,

    #[serde(default)]
    pub hooks: HooksConfig,

    #[serde(default)]
    pub emit: EmitConfig,

    #[serde(default)]
    pub dev: DevSettings,
}

impl Default for ArborConfig {
    fn default() -> Self {
        Self {
            entry_point: default_entry_point(),
            routes: default_routes(),
            public_dir: default_public_dir(),
            cwd: None,
            bundler: BundlerConfig::default(),
            formatter: FormatterConfig::default(),
            hooks: HooksConfig::default(),
            emit: EmitConfig::default(),
            dev: DevSettings::default(),
        }
    }
}
