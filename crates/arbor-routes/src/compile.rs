//! Scan → emit → format → write for one route root.

use crate::emit::{emit, EmitOptions};
use crate::error::{Result, RouteError};
use crate::format::Formatter;
use crate::tree::RouteTree;
use std::path::{Path, PathBuf};

/// Client view table written into each route root.
pub const CLIENT_ARTIFACT: &str = "_main.tsx";

/// Server middleware table written into each route root.
pub const SERVER_ARTIFACT: &str = "_main.ts";

/// Paths of both generated artifacts for `root`.
pub fn artifact_paths(root: &Path) -> [PathBuf; 2] {
    [root.join(CLIENT_ARTIFACT), root.join(SERVER_ARTIFACT)]
}

/// Outcome of compiling one route root.
#[derive(Debug, Clone)]
pub struct CompileReport {
    pub root: PathBuf,
    /// Number of nodes in the assembled tree, root included
    pub nodes: usize,
    /// Artifacts written, in write order
    pub written: Vec<PathBuf>,
}

/// Compile the route tree under `root` and write its artifacts.
///
/// A formatter or write failure only skips that artifact; the other one is
/// still attempted, and the call reports [`RouteError::Artifacts`] afterwards.
pub async fn compile_routes(
    root: &Path,
    options: &EmitOptions,
    formatter: &dyn Formatter,
) -> Result<CompileReport> {
    let tree = RouteTree::from_dir(root)?;
    let artifacts = emit(&tree, options);
    tracing::debug!(
        root = %root.display(),
        nodes = tree.len(),
        client = artifacts.client.is_some(),
        "route tree assembled"
    );

    let mut jobs = Vec::with_capacity(2);
    if let Some(client) = artifacts.client {
        jobs.push((root.join(CLIENT_ARTIFACT), client.source));
    }
    jobs.push((root.join(SERVER_ARTIFACT), artifacts.server.source));

    let total = jobs.len();
    let mut written = Vec::with_capacity(total);
    for (path, source) in jobs {
        match write_artifact(&path, &source, formatter).await {
            Ok(()) => written.push(path),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "route artifact not written");
            }
        }
    }

    if written.len() < total {
        return Err(RouteError::Artifacts {
            root: root.to_path_buf(),
            failed: total - written.len(),
            total,
        });
    }

    Ok(CompileReport {
        root: root.to_path_buf(),
        nodes: tree.len(),
        written,
    })
}

/// Format `source` and write it to `path`. Nothing is written if formatting fails.
pub async fn write_artifact(path: &Path, source: &str, formatter: &dyn Formatter) -> Result<()> {
    let formatted = formatter.format(source, path).await?;
    tokio::fs::write(path, formatted)
        .await
        .map_err(|source| RouteError::Write {
            path: path.to_path_buf(),
            source,
        })
}
