//! Build Coordinator: one full route-compile and bundle cycle.
//!
//! A cycle runs, in order:
//!
//! 1. the pre-build hook
//! 2. output directory cleanup (when enabled). Cleanup deliberately follows
//!    the pre-build hook, so anything the hook writes into the output
//!    directory is removed; hooks should write elsewhere.
//! 3. route compilation for every route root, aborting on the first failure
//! 4. the bundler, followed by `stop()` whatever the outcome
//! 5. the post-build hook, only when everything above succeeded
//!
//! [`BuildCoordinator::build`] never returns an error. Failures are reported
//! to the operator and the cycle answers `false`.

mod bundler;
mod hooks;

pub use bundler::{BundleRequest, Bundler, BundlerPlugin, EsbuildBundler};
pub use hooks::{BuildHook, CommandHook};

use crate::commands::utils;
use crate::config::{ArborConfig, ProjectPaths};
use crate::error::Result;
use crate::mode::AppMode;
use crate::ui;
use arbor_routes::{compile_routes, CommandFormatter, EmitOptions, Formatter, PassthroughFormatter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Inputs of a build cycle, fixed for the lifetime of a coordinator.
#[derive(Clone)]
pub struct BuildOptions {
    pub route_roots: Vec<PathBuf>,
    pub entry_point: PathBuf,
    pub out_dir: PathBuf,
    pub mode: AppMode,
    /// Empty the output directory before bundling
    pub clean: bool,
    pub plugins: Vec<Arc<dyn BundlerPlugin>>,
    pub emit: EmitOptions,
    pub jsx_import_source: Option<String>,
}

impl BuildOptions {
    pub fn from_config(config: &ArborConfig, paths: &ProjectPaths, mode: AppMode) -> Self {
        Self {
            route_roots: paths.route_roots.clone(),
            entry_point: paths.entry_point.clone(),
            out_dir: paths.out_dir.clone(),
            mode,
            clean: false,
            plugins: config
                .bundler
                .plugins
                .iter()
                .cloned()
                .map(|plugin| Arc::new(plugin) as Arc<dyn BundlerPlugin>)
                .collect(),
            emit: EmitOptions::from(&config.emit),
            jsx_import_source: config.bundler.jsx_import_source.clone(),
        }
    }

    fn bundle_request(&self) -> BundleRequest {
        BundleRequest {
            entry_point: self.entry_point.clone(),
            out_dir: self.out_dir.clone(),
            mode: self.mode,
            jsx_import_source: self.jsx_import_source.clone(),
            plugins: self.plugins.clone(),
        }
    }
}

/// Runs build cycles against a bundler, a formatter and optional hooks.
pub struct BuildCoordinator {
    options: BuildOptions,
    bundler: Arc<dyn Bundler>,
    formatter: Arc<dyn Formatter>,
    pre_build: Option<Arc<dyn BuildHook>>,
    post_build: Option<Arc<dyn BuildHook>>,
}

impl BuildCoordinator {
    pub fn new(options: BuildOptions, bundler: Arc<dyn Bundler>, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            options,
            bundler,
            formatter,
            pre_build: None,
            post_build: None,
        }
    }

    /// Coordinator using the configured bundler command, formatter and hooks.
    pub fn from_config(config: &ArborConfig, paths: &ProjectPaths, mode: AppMode) -> Result<Self> {
        let options = BuildOptions::from_config(config, paths, mode);
        let bundler = EsbuildBundler::new(config.bundler.command.clone(), paths.cwd.clone())?;

        let formatter: Arc<dyn Formatter> = match CommandFormatter::new(&config.formatter.command) {
            Some(formatter) if config.formatter.enabled => Arc::new(formatter),
            _ => Arc::new(PassthroughFormatter),
        };

        let mut coordinator = Self::new(options, Arc::new(bundler), formatter);
        if let Some(command) = &config.hooks.pre_build {
            coordinator = coordinator.with_pre_build(CommandHook::new(
                "preBuild",
                command.clone(),
                paths.cwd.clone(),
            ));
        }
        if let Some(command) = &config.hooks.post_build {
            coordinator = coordinator.with_post_build(CommandHook::new(
                "postBuild",
                command.clone(),
                paths.cwd.clone(),
            ));
        }
        Ok(coordinator)
    }

    pub fn with_pre_build(mut self, hook: impl BuildHook + 'static) -> Self {
        self.pre_build = Some(Arc::new(hook));
        self
    }

    pub fn with_post_build(mut self, hook: impl BuildHook + 'static) -> Self {
        self.post_build = Some(Arc::new(hook));
        self
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.options.clean = clean;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Run one build cycle and report whether it succeeded.
    pub async fn build(&self) -> bool {
        self.build_timed().await.0
    }

    /// Like [`BuildCoordinator::build`], also returning the cycle's duration.
    pub async fn build_timed(&self) -> (bool, Duration) {
        let start = Instant::now();
        let result = self.run_cycle().await;
        let elapsed = start.elapsed();

        match result {
            Ok(()) => {
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "build completed");
                ui::success(&format!("Build completed in {}", ui::format_duration(elapsed)));
                (true, elapsed)
            }
            Err(err) => {
                tracing::error!(error = %err, "build failed");
                ui::error(&format!("Build failed in {}", ui::format_duration(elapsed)));
                (false, elapsed)
            }
        }
    }

    async fn run_cycle(&self) -> Result<()> {
        if let Some(hook) = &self.pre_build {
            hook.run().await?;
        }

        utils::prepare_out_dir(&self.options.out_dir, self.options.clean)?;

        for root in &self.options.route_roots {
            let report = compile_routes(root, &self.options.emit, self.formatter.as_ref()).await?;
            tracing::debug!(
                root = %report.root.display(),
                nodes = report.nodes,
                written = report.written.len(),
                "routes compiled"
            );
        }

        utils::validate_entry(&self.options.entry_point)?;
        let request = self.options.bundle_request();
        let bundled = self.bundler.build(&request).await;
        self.bundler.stop().await;
        bundled?;

        if let Some(hook) = &self.post_build {
            hook.run().await?;
        }
        Ok(())
    }
}
