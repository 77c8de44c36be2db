//! The external bundler seam.
//!
//! A cycle hands the bundler one [`BundleRequest`] and always calls
//! [`Bundler::stop`] afterwards, whether the bundle succeeded or not.

use crate::config::PluginSpec;
use crate::error::{BuildError, Result};
use crate::mode::AppMode;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

/// One entry of the plugin chain.
pub trait BundlerPlugin: Send + Sync {
    fn name(&self) -> &str;

    /// Arguments appended to the bundler invocation.
    fn args(&self) -> Vec<String>;
}

impl BundlerPlugin for PluginSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn args(&self) -> Vec<String> {
        self.args.clone()
    }
}

/// Everything one bundler invocation needs.
#[derive(Clone)]
pub struct BundleRequest {
    pub entry_point: PathBuf,
    pub out_dir: PathBuf,
    pub mode: AppMode,
    pub jsx_import_source: Option<String>,
    /// Applied in order after the built-in options
    pub plugins: Vec<Arc<dyn BundlerPlugin>>,
}

impl std::fmt::Debug for BundleRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plugins: Vec<&str> = self.plugins.iter().map(|p| p.name()).collect();
        f.debug_struct("BundleRequest")
            .field("entry_point", &self.entry_point)
            .field("out_dir", &self.out_dir)
            .field("mode", &self.mode)
            .field("jsx_import_source", &self.jsx_import_source)
            .field("plugins", &plugins)
            .finish()
    }
}

#[async_trait]
pub trait Bundler: Send + Sync {
    /// Bundle the request's entry point into its output directory.
    async fn build(&self, request: &BundleRequest) -> Result<()>;

    /// Release bundler resources after an invocation.
    async fn stop(&self);
}

/// Runs the `esbuild` command line, once per cycle.
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    command: Vec<String>,
    cwd: PathBuf,
}

impl EsbuildBundler {
    pub fn new(command: Vec<String>, cwd: PathBuf) -> Result<Self> {
        if command.is_empty() {
            return Err(BuildError::Bundler("bundler command is empty".to_string()).into());
        }
        Ok(Self { command, cwd })
    }

    /// Full argument list (without the program) for `request`.
    pub fn args(&self, request: &BundleRequest) -> Vec<String> {
        let mut args: Vec<String> = self.command[1..].to_vec();
        args.push(request.entry_point.display().to_string());
        args.extend(
            [
                "--bundle",
                "--splitting",
                "--format=esm",
                "--platform=neutral",
                "--jsx=automatic",
                "--tree-shaking=true",
            ]
            .map(String::from),
        );
        args.push(format!("--outdir={}", request.out_dir.display()));
        if let Some(source) = &request.jsx_import_source {
            args.push(format!("--jsx-import-source={source}"));
        }

        if request.mode.is_production() {
            args.push("--minify".to_string());
        } else {
            args.extend(
                [
                    "--minify-syntax",
                    "--minify-whitespace",
                    "--jsx-dev",
                    "--sourcemap=linked",
                ]
                .map(String::from),
            );
        }

        for plugin in &request.plugins {
            tracing::debug!(plugin = plugin.name(), "applying bundler plugin");
            args.extend(plugin.args());
        }
        args
    }
}

#[async_trait]
impl Bundler for EsbuildBundler {
    async fn build(&self, request: &BundleRequest) -> Result<()> {
        let program = &self.command[0];
        let args = self.args(request);
        tracing::debug!(%program, ?args, "running bundler");

        // Output is inherited: the bundler reports its own diagnostics
        let status = Command::new(program)
            .args(&args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| BuildError::Bundler(format!("failed to run {program}: {e}")))?;

        if !status.success() {
            return Err(BuildError::Bundler(format!("{program} exited with {status}")).into());
        }
        Ok(())
    }

    async fn stop(&self) {
        // Each invocation is its own process, nothing outlives it
        tracing::trace!("bundler stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: AppMode) -> BundleRequest {
        BundleRequest {
            entry_point: PathBuf::from("/app/app.tsx"),
            out_dir: PathBuf::from("/app/public/build"),
            mode,
            jsx_import_source: None,
            plugins: Vec::new(),
        }
    }

    fn bundler() -> EsbuildBundler {
        EsbuildBundler::new(vec!["esbuild".to_string()], PathBuf::from("/app")).unwrap()
    }

    #[test]
    fn test_development_args() {
        let args = bundler().args(&request(AppMode::Development));
        assert_eq!(args[0], "/app/app.tsx");
        assert!(args.contains(&"--bundle".to_string()));
        assert!(args.contains(&"--splitting".to_string()));
        assert!(args.contains(&"--outdir=/app/public/build".to_string()));
        assert!(args.contains(&"--jsx-dev".to_string()));
        assert!(args.contains(&"--sourcemap=linked".to_string()));
        assert!(!args.contains(&"--minify".to_string()));
    }

    #[test]
    fn test_production_args() {
        let args = bundler().args(&request(AppMode::Production));
        assert!(args.contains(&"--minify".to_string()));
        assert!(!args.contains(&"--jsx-dev".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--sourcemap")));
    }

    #[test]
    fn test_command_prefix_and_plugins_in_order() {
        let bundler = EsbuildBundler::new(
            vec!["npx".to_string(), "esbuild".to_string()],
            PathBuf::from("/app"),
        )
        .unwrap();
        let mut request = request(AppMode::Development);
        request.jsx_import_source = Some("preact".to_string());
        request.plugins = vec![
            Arc::new(PluginSpec {
                name: "loaders".to_string(),
                args: vec!["--loader:.svg=text".to_string()],
            }),
            Arc::new(PluginSpec {
                name: "define".to_string(),
                args: vec!["--define:DEBUG=true".to_string()],
            }),
        ];

        let args = bundler.args(&request);
        assert_eq!(args[0], "esbuild");
        assert!(args.contains(&"--jsx-import-source=preact".to_string()));
        let n = args.len();
        assert_eq!(args[n - 2], "--loader:.svg=text");
        assert_eq!(args[n - 1], "--define:DEBUG=true");
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(EsbuildBundler::new(Vec::new(), PathBuf::from("/app")).is_err());
    }
}
