//! Pre-build and post-build hooks.

use crate::error::{BuildError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Work run once per build cycle, before or after compiling and bundling.
#[async_trait]
pub trait BuildHook: Send + Sync {
    /// `preBuild` or `postBuild`, used in errors and logs.
    fn name(&self) -> &str;

    async fn run(&self) -> Result<()>;
}

/// A hook that runs an argv-style command in the project directory.
#[derive(Debug, Clone)]
pub struct CommandHook {
    name: String,
    command: Vec<String>,
    cwd: PathBuf,
}

impl CommandHook {
    pub fn new(name: impl Into<String>, command: Vec<String>, cwd: PathBuf) -> Self {
        Self {
            name: name.into(),
            command,
            cwd,
        }
    }

    fn failed(&self, reason: String) -> BuildError {
        BuildError::Hook {
            hook: self.name.clone(),
            reason,
        }
    }
}

#[async_trait]
impl BuildHook for CommandHook {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> Result<()> {
        let Some((program, args)) = self.command.split_first() else {
            return Err(self.failed("empty command".to_string()).into());
        };
        tracing::debug!(hook = %self.name, %program, ?args, "running build hook");

        let status = Command::new(program)
            .args(args)
            .current_dir(&self.cwd)
            .status()
            .await
            .map_err(|e| self.failed(format!("failed to run {program}: {e}")))?;

        if !status.success() {
            return Err(self.failed(format!("{program} exited with {status}")).into());
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn hook(command: &[&str]) -> CommandHook {
        CommandHook::new(
            "preBuild",
            command.iter().map(|s| s.to_string()).collect(),
            std::env::temp_dir(),
        )
    }

    #[tokio::test]
    async fn test_successful_hook() {
        assert!(hook(&["true"]).run().await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_hook() {
        let err = hook(&["false"]).run().await.unwrap_err();
        match err {
            CliError::Build(BuildError::Hook { hook, .. }) => assert_eq!(hook, "preBuild"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program() {
        let err = hook(&["arbor-test-no-such-program"]).run().await.unwrap_err();
        assert!(err.to_string().contains("failed to run"));
    }

    #[tokio::test]
    async fn test_empty_command() {
        assert!(hook(&[]).run().await.is_err());
    }
}
