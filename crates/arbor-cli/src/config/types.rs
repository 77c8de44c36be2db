use arbor_routes::EmitOptions;
use serde::{Deserialize, Serialize};

use crate::config::defaults::*;

/// External bundler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BundlerConfig {
    /// Bundler command line; entry point and options are appended
    #[serde(default = "default_bundler_command")]
    pub command: Vec<String>,

    /// JSX import source passed to the automatic runtime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsx_import_source: Option<String>,

    /// Plugins applied in order after the built-in options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginSpec>,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            command: default_bundler_command(),
            jsx_import_source: None,
            plugins: Vec::new(),
        }
    }
}

/// One entry of the bundler plugin chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PluginSpec {
    /// Plugin name, used in logs
    pub name: String,

    /// Arguments this plugin adds to the bundler invocation
    #[serde(default)]
    pub args: Vec<String>,
}

/// Formatter run over generated route artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormatterConfig {
    /// Write raw generated text when false
    #[serde(default = "default_formatter_enabled")]
    pub enabled: bool,

    /// Formatter command reading stdin and writing stdout; `{ext}` is replaced
    /// by the artifact's extension
    #[serde(default = "default_formatter_command")]
    pub command: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enabled: default_formatter_enabled(),
            command: default_formatter_command(),
        }
    }
}

/// Commands run around each build cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HooksConfig {
    /// Runs first in every cycle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_build: Option<Vec<String>>,

    /// Runs only after a successful cycle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_build: Option<Vec<String>>,
}

/// Module specifiers used by generated imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmitConfig {
    #[serde(default = "default_client_runtime")]
    pub client_runtime: String,

    #[serde(default = "default_server_runtime")]
    pub server_runtime: String,

    #[serde(default = "default_view_router")]
    pub view_router: String,

    #[serde(default = "default_server_router")]
    pub server_router: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            client_runtime: default_client_runtime(),
            server_runtime: default_server_runtime(),
            view_router: default_view_router(),
            server_router: default_server_router(),
        }
    }
}

impl From<&EmitConfig> for EmitOptions {
    fn from(config: &EmitConfig) -> Self {
        EmitOptions {
            client_runtime: config.client_runtime.clone(),
            server_runtime: config.server_runtime.clone(),
            view_router: config.view_router.clone(),
            server_router: config.server_router.clone(),
        }
    }
}

/// Development loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DevSettings {
    /// Live-reload server port
    #[serde(default = "default_dev_port")]
    pub port: u16,

    /// Application command, launched with `APP_ENV=development`
    #[serde(default = "default_app_command")]
    pub app_command: Vec<String>,

    /// Quiet window after the last file change before a build is requested
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Extra watch ignore patterns (`*.ext` suffixes or path prefixes)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

impl Default for DevSettings {
    fn default() -> Self {
        Self {
            port: default_dev_port(),
            app_command: default_app_command(),
            debounce_ms: default_debounce_ms(),
            ignore: Vec::new(),
        }
    }
}
