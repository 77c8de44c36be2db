//! Control loop of the development server.
//!
//! One task owns the [`Coordinator`], the running app and the session
//! registry handle. Builds and restarts run as spawned tasks that report back
//! over the same channel as file changes and readiness signals, so every
//! state transition happens on the control loop.

use super::coordinator::{Action, Coordinator};
use super::process::{AppLauncher, AppProcess};
use super::state::{DevCommand, DevContext};
use super::watcher::FileChange;
use crate::build::BuildCoordinator;
use crate::ui;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Runs one build cycle.
#[async_trait]
pub trait BuildRunner: Send + Sync {
    async fn build(&self) -> bool;
}

#[async_trait]
impl BuildRunner for BuildCoordinator {
    async fn build(&self) -> bool {
        BuildCoordinator::build(self).await
    }
}

/// Input of the control loop.
pub enum Signal {
    BuildRequested,
    BuildFinished { success: bool },
    /// Carries the newly launched app back to the loop
    RestartFinished { app: Option<Box<dyn AppProcess>> },
    /// The app called `/listening`
    Ready,
    Shutdown,
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::BuildRequested => f.write_str("BuildRequested"),
            Signal::BuildFinished { success } => f
                .debug_struct("BuildFinished")
                .field("success", success)
                .finish(),
            Signal::RestartFinished { app } => f
                .debug_struct("RestartFinished")
                .field("running", &app.is_some())
                .finish(),
            Signal::Ready => f.write_str("Ready"),
            Signal::Shutdown => f.write_str("Shutdown"),
        }
    }
}

/// Cloneable sender into the control loop.
#[derive(Debug, Clone)]
pub struct OrchestratorHandle {
    tx: mpsc::Sender<Signal>,
}

impl OrchestratorHandle {
    pub fn new(tx: mpsc::Sender<Signal>) -> Self {
        Self { tx }
    }

    /// Returns false once the control loop has stopped.
    pub async fn request_build(&self) -> bool {
        self.tx.send(Signal::BuildRequested).await.is_ok()
    }

    pub async fn ready(&self) -> bool {
        self.tx.send(Signal::Ready).await.is_ok()
    }

    pub async fn shutdown(&self) -> bool {
        self.tx.send(Signal::Shutdown).await.is_ok()
    }
}

pub struct Orchestrator {
    coordinator: Coordinator,
    builder: Arc<dyn BuildRunner>,
    launcher: Arc<dyn AppLauncher>,
    context: Arc<DevContext>,
    app: Option<Box<dyn AppProcess>>,
    tx: mpsc::Sender<Signal>,
    rx: mpsc::Receiver<Signal>,
}

impl Orchestrator {
    pub fn new(
        builder: Arc<dyn BuildRunner>,
        launcher: Arc<dyn AppLauncher>,
        context: Arc<DevContext>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(64);
        Self {
            coordinator: Coordinator::new(),
            builder,
            launcher,
            context,
            app: None,
            tx,
            rx,
        }
    }

    pub fn handle(&self) -> OrchestratorHandle {
        OrchestratorHandle::new(self.tx.clone())
    }

    /// Process signals until [`Signal::Shutdown`], then stop the app.
    ///
    /// In-flight builds and restarts are never cancelled; their completion
    /// is simply ignored after shutdown.
    pub async fn run(mut self) {
        while let Some(signal) = self.rx.recv().await {
            tracing::debug!(?signal, "orchestrator signal");
            let action = match signal {
                Signal::BuildRequested => self.coordinator.build_requested(),
                Signal::BuildFinished { success } => self.coordinator.build_finished(success),
                Signal::RestartFinished { app } => {
                    self.app = app;
                    self.coordinator.restart_finished()
                }
                Signal::Ready => {
                    let action = self.coordinator.ready();
                    if action.is_some() {
                        ui::info("Server restarted");
                    } else {
                        ui::info("Server started");
                    }
                    action
                }
                Signal::Shutdown => break,
            };

            if let Some(action) = action {
                self.perform(action).await;
            }
        }

        if let Some(mut app) = self.app.take() {
            app.stop().await;
        }
    }

    async fn perform(&mut self, action: Action) {
        match action {
            Action::StartBuild => {
                ui::info("Building app");
                let builder = Arc::clone(&self.builder);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let success = builder.build().await;
                    let _ = tx.send(Signal::BuildFinished { success }).await;
                });
            }
            Action::Restart => {
                if self.coordinator.is_launching() {
                    ui::info("Starting app");
                } else {
                    ui::info("Restarting app");
                }
                let previous = self.app.take();
                let launcher = Arc::clone(&self.launcher);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    if let Some(mut app) = previous {
                        app.stop().await;
                    }
                    let app = launcher.launch().await;
                    let _ = tx.send(Signal::RestartFinished { app }).await;
                });
            }
            Action::BroadcastReload => {
                let sessions = self.context.broadcast(&DevCommand::Reload);
                tracing::debug!(sessions, "reload broadcast");
            }
        }
    }
}

/// Turn bursts of file changes into single build requests.
///
/// A build is requested once no change has arrived for `window`.
pub fn spawn_debounce(
    mut changes: mpsc::Receiver<FileChange>,
    window: Duration,
    handle: OrchestratorHandle,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(change) = changes.recv().await {
            tracing::debug!(path = %change.path().display(), "file changed");

            let sleep = tokio::time::sleep(window);
            tokio::pin!(sleep);
            loop {
                tokio::select! {
                    _ = &mut sleep => break,
                    next = changes.recv() => match next {
                        Some(change) => {
                            tracing::debug!(path = %change.path().display(), "file changed");
                            sleep.as_mut().reset(tokio::time::Instant::now() + window);
                        }
                        None => break,
                    },
                }
            }

            if !handle.request_build().await {
                return;
            }
        }
    })
}
