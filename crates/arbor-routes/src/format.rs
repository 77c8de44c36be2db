//! Formatting of generated artifacts before they are written.
//!
//! The default formatter pipes source text through an external command
//! (stdin → stdout). Any spawn failure or non-zero exit aborts the write of
//! that artifact.

use crate::error::{Result, RouteError};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Placeholder in formatter arguments replaced by the artifact's extension.
pub const EXT_PLACEHOLDER: &str = "{ext}";

/// Filter applied to generated source text.
#[async_trait]
pub trait Formatter: Send + Sync {
    /// Format `source`, which is about to be written to `path`.
    async fn format(&self, source: &str, path: &Path) -> Result<String>;
}

/// Writes generated text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughFormatter;

#[async_trait]
impl Formatter for PassthroughFormatter {
    async fn format(&self, source: &str, _path: &Path) -> Result<String> {
        Ok(source.to_string())
    }
}

/// Runs an external formatter over stdin/stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    /// Create a formatter from an argv-style command line.
    ///
    /// Returns `None` for an empty command.
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// `deno fmt --ext {ext} -`
    pub fn deno() -> Self {
        Self {
            program: "deno".to_string(),
            args: ["fmt", "--ext", EXT_PLACEHOLDER, "-"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Arguments for formatting `path`, with the extension substituted.
    pub fn args_for(&self, path: &Path) -> Vec<String> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("ts");
        self.args
            .iter()
            .map(|arg| arg.replace(EXT_PLACEHOLDER, ext))
            .collect()
    }
}

#[async_trait]
impl Formatter for CommandFormatter {
    async fn format(&self, source: &str, path: &Path) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args_for(path))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = path.parent() {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| RouteError::format(path, format!("failed to run {}: {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RouteError::format(path, "formatter stdin unavailable"))?;
        stdin
            .write_all(source.as_bytes())
            .await
            .map_err(|e| RouteError::format(path, e.to_string()))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| RouteError::format(path, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RouteError::format(
                path,
                format!("{} ({})", output.status, stderr.trim()),
            ));
        }

        String::from_utf8(output.stdout).map_err(|e| RouteError::format(path, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deno_args_follow_extension() {
        let formatter = CommandFormatter::deno();
        assert_eq!(
            formatter.args_for(&PathBuf::from("routes/_main.tsx")),
            vec!["fmt", "--ext", "tsx", "-"]
        );
        assert_eq!(
            formatter.args_for(&PathBuf::from("routes/_main.ts")),
            vec!["fmt", "--ext", "ts", "-"]
        );
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(CommandFormatter::new(&[]).is_none());
    }

    #[tokio::test]
    async fn test_passthrough() {
        let out = PassthroughFormatter
            .format("const a = 1;", Path::new("x.ts"))
            .await
            .unwrap();
        assert_eq!(out, "const a = 1;");
    }

    #[tokio::test]
    async fn test_missing_program_names_path() {
        let formatter =
            CommandFormatter::new(&["arbor-definitely-missing-formatter".to_string()]).unwrap();
        let err = formatter
            .format("x", Path::new("routes/_main.ts"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("routes/_main.ts"));
    }
}
