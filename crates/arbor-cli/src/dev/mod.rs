//! Development loop: watch, rebuild, restart the app, reload browsers.
//!
//! - [`coordinator`] holds the coalescing state machine
//! - [`orchestrator`] runs it, spawning builds and restarts
//! - [`watcher`] and [`orchestrator::spawn_debounce`] turn file changes into
//!   build requests
//! - [`server`] serves `/live-reload` and `/listening`

pub mod config;
pub mod coordinator;
pub mod orchestrator;
pub mod process;
pub mod server;
pub mod state;
pub mod watcher;

pub use config::DevConfig;
pub use coordinator::{Action, Axis, Coordinator};
pub use orchestrator::{spawn_debounce, BuildRunner, Orchestrator, OrchestratorHandle, Signal};
pub use process::{AppLauncher, AppProcess, ChildApp, CommandLauncher};
pub use server::{router, serve, DevServer, ServerState};
pub use state::{DevCommand, DevContext, SessionRegistry};
pub use watcher::{FileChange, FileWatcher, WatchFilter};
