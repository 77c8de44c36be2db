//! `arbor dev`: the development loop.
//!
//! Binds the live-reload server, starts the watcher and the control loop,
//! requests the initial build and runs until Ctrl+C.

use crate::build::BuildCoordinator;
use crate::cli::DevArgs;
use crate::config::{ConfigOverrides, ProjectPaths};
use crate::dev::{
    spawn_debounce, CommandLauncher, DevConfig, DevContext, DevServer, FileWatcher, Orchestrator,
    ServerState, WatchFilter,
};
use crate::error::{CliError, Result, ResultExt};
use crate::mode::AppMode;
use crate::ui;
use std::sync::Arc;
use tokio::signal;

/// Execute the dev command.
///
/// # Errors
///
/// Returns errors for invalid configuration, a port that cannot be bound,
/// watcher failures, or the server stopping unexpectedly. Build failures are
/// reported and retried on the next change.
pub async fn execute(args: DevArgs) -> Result<()> {
    let port = match args.port {
        Some(port) => Some(port),
        None => DevConfig::port_from_env()?,
    };
    let (config, cwd) = super::load_project(&args.project, &ConfigOverrides { port })?;

    let mode = AppMode::from_env();
    let paths = ProjectPaths::resolve(&config, &cwd, mode);
    let dev = DevConfig::new(&config, paths.clone(), mode);

    // Every dev cycle starts from an empty output directory
    let builder = BuildCoordinator::from_config(&config, &paths, mode)?.with_clean(true);
    let launcher = CommandLauncher::new(dev.app_command.clone(), cwd.clone());
    let context = Arc::new(DevContext::new());
    let orchestrator = Orchestrator::new(Arc::new(builder), Arc::new(launcher), Arc::clone(&context));
    let handle = orchestrator.handle();

    let server = DevServer::bind(
        dev.addr,
        ServerState {
            context,
            orchestrator: handle.clone(),
        },
    )
    .await?;
    ui::info(&format!("Live reload listening on: {}", dev.server_url()));
    let mut server_task = tokio::spawn(server.run());

    let filter = WatchFilter::new(
        cwd.clone(),
        paths.out_dir.clone(),
        paths.artifacts(),
        dev.watch_ignore.clone(),
    );
    let (watcher, changes) = FileWatcher::new(filter).context("Failed to watch the project directory")?;
    ui::info(&format!("Watching {}", watcher.root().display()));
    let debounce = spawn_debounce(changes, dev.debounce, handle.clone());

    let control = tokio::spawn(orchestrator.run());
    handle.request_build().await;
    ui::info("Press Ctrl+C to stop");

    let result = tokio::select! {
        _ = signal::ctrl_c() => {
            ui::info("Shutting down development server...");
            Ok(())
        }
        finished = &mut server_task => match finished {
            Ok(Ok(())) => Err(CliError::Server("Server stopped unexpectedly".to_string())),
            Ok(Err(err)) => Err(err),
            Err(err) => Err(CliError::Server(format!("Server task failed: {}", err))),
        },
    };

    debounce.abort();
    drop(watcher);
    handle.shutdown().await;
    if let Err(err) = control.await {
        tracing::warn!(error = %err, "control loop ended abnormally");
    }
    server_task.abort();

    if result.is_ok() {
        ui::success("Development server stopped");
    }
    result
}
