//! Errors surfaced by `arbor build` and `arbor dev`.
//!
//! Anything the operator can fix (a bad config value, a missing entry file,
//! a failing hook) ends its message with a `Hint:` line. Route compilation
//! failures pass through untouched so their miette codes survive to the
//! terminal.

mod diagnostic;

pub use diagnostic::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// The routes directory could not be compiled into route tables.
    #[error(transparent)]
    Routes(#[from] arbor_routes::RouteError),

    /// A path that exists but has the wrong kind, such as an entry point
    /// that is a directory.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A directory the command needs to walk is missing.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The live-reload endpoint failed to bind or stopped serving.
    #[error("Server error: {0}")]
    Server(String),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// An error wrapped with a leading description by [`ResultExt::context`].
    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--config` named a file that does not exist.
    #[error("Config file not found: {}\n\nHint: Create an arbor.config.json file or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    /// The merged file, environment and flag layers did not deserialize.
    #[error("Invalid configuration: {0}\n\nHint: Check arbor.config.json syntax and field types")]
    Extract(String),

    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField { field: String, hint: String },

    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Entry point not found: {}\n\nHint: Check the 'entryPoint' field in arbor.config.json", .0.display())]
    EntryNotFound(PathBuf),

    /// The bundler process could not be spawned or exited non-zero.
    #[error("Bundler failed: {0}")]
    Bundler(String),

    /// `hook` is `preBuild` or `postBuild`.
    #[error("{hook} hook failed: {reason}\n\nHint: Check the 'hooks' commands in arbor.config.json")]
    Hook { hook: String, reason: String },

    /// A build cycle reported failure after running for `duration`.
    #[error("Build failed after {duration}")]
    Failed { duration: String },
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

pub trait ResultExt<T> {
    /// Prefix the error message with `msg`, e.g. the step that failed.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|err| CliError::Custom(format!("{msg}: {}", err.into())))
    }
}
