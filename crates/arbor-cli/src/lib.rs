//! Arbor CLI - file-system routing compiler and development server.
//!
//! The route compiler itself lives in `arbor-routes`; this crate wires it
//! into a build cycle and a development loop.
//!
//! # Architecture
//!
//! - [`config`] - `arbor.config.json`, environment and flag merging
//! - [`build`] - the Build Coordinator, bundler and hook seams
//! - [`dev`] - coalescing coordinator, control loop, watcher, live-reload server
//! - [`commands`] - `build` and `dev` command implementations
//! - [`error`] - error types with actionable hints
//! - [`logger`] - structured logging with tracing
//! - [`ui`] - terminal status lines
//!
//! # Example
//!
//! ```rust,no_run
//! use arbor_cli::build::BuildCoordinator;
//! use arbor_cli::config::{ArborConfig, ConfigOverrides, ProjectPaths};
//! use arbor_cli::mode::AppMode;
//! use std::path::Path;
//!
//! # async fn run() -> arbor_cli::Result<()> {
//! let cwd = Path::new("/srv/app");
//! let config = ArborConfig::load(cwd, None, &ConfigOverrides::default())?;
//! let paths = ProjectPaths::resolve(&config, cwd, AppMode::from_env());
//! let coordinator = BuildCoordinator::from_config(&config, &paths, AppMode::from_env())?;
//! let ok = coordinator.build().await;
//! # let _ = ok;
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dev;
pub mod error;
pub mod logger;
pub mod mode;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
