//! The application child process.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::{Child, Command};

use crate::mode::{AppMode, APP_ENV};

/// A running application instance.
#[async_trait]
pub trait AppProcess: Send {
    /// Kill the process and wait for it to exit.
    async fn stop(&mut self);
}

/// Starts application instances.
#[async_trait]
pub trait AppLauncher: Send + Sync {
    /// Launch a new instance. Returns `None` when it could not be started.
    async fn launch(&self) -> Option<Box<dyn AppProcess>>;
}

/// Launches the configured app command with `APP_ENV=development`.
#[derive(Debug, Clone)]
pub struct CommandLauncher {
    command: Vec<String>,
    cwd: PathBuf,
}

impl CommandLauncher {
    pub fn new(command: Vec<String>, cwd: PathBuf) -> Self {
        Self { command, cwd }
    }
}

#[async_trait]
impl AppLauncher for CommandLauncher {
    async fn launch(&self) -> Option<Box<dyn AppProcess>> {
        let Some((program, args)) = self.command.split_first() else {
            tracing::warn!("app command is empty");
            return None;
        };

        let spawned = Command::new(program)
            .args(args)
            .current_dir(&self.cwd)
            .env(APP_ENV, AppMode::Development.as_str())
            .kill_on_drop(true)
            .spawn();

        match spawned {
            Ok(child) => {
                tracing::debug!(pid = child.id(), %program, "app launched");
                Some(Box::new(ChildApp { child }))
            }
            Err(err) => {
                crate::ui::warning(&format!("Failed to start app: {err}"));
                None
            }
        }
    }
}

/// An app instance backed by a child process.
#[derive(Debug)]
pub struct ChildApp {
    child: Child,
}

#[async_trait]
impl AppProcess for ChildApp {
    async fn stop(&mut self) {
        if let Err(err) = self.child.start_kill() {
            tracing::warn!(error = %err, "failed to kill app");
        }
        // Exit must complete before the next instance launches
        match self.child.wait().await {
            Ok(status) => tracing::debug!(%status, "app exited"),
            Err(err) => tracing::warn!(error = %err, "failed to wait for app"),
        }
    }
}
