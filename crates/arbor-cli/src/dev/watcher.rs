//! File system watcher for development mode.
//!
//! Watches the project directory recursively and forwards changes to relevant
//! files. Build output, generated route artifacts, hidden paths,
//! `node_modules` and configured ignore patterns never trigger a build.

use crate::error::{CliError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }

    fn from_event(kind: &EventKind, path: &Path) -> Option<Self> {
        let path = path.to_path_buf();
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path)),
            EventKind::Modify(_) => Some(FileChange::Modified(path)),
            EventKind::Remove(_) => Some(FileChange::Removed(path)),
            _ => None,
        }
    }
}

/// Decides which paths are build inputs.
#[derive(Debug, Clone)]
pub struct WatchFilter {
    root: PathBuf,
    out_dir: PathBuf,
    artifacts: HashSet<PathBuf>,
    ignore_patterns: Vec<String>,
}

impl WatchFilter {
    pub fn new(
        root: PathBuf,
        out_dir: PathBuf,
        artifacts: impl IntoIterator<Item = PathBuf>,
        ignore_patterns: Vec<String>,
    ) -> Self {
        Self {
            root,
            out_dir,
            artifacts: artifacts.into_iter().collect(),
            ignore_patterns,
        }
    }

    /// True for paths the build writes itself.
    pub fn is_build_artifact(&self, path: &Path) -> bool {
        path.starts_with(&self.out_dir) || self.artifacts.contains(path)
    }

    pub fn should_ignore(&self, path: &Path) -> bool {
        // Only watch files within root
        let Ok(rel_path) = path.strip_prefix(&self.root) else {
            return true;
        };

        if self.is_build_artifact(path) {
            return true;
        }

        let path_str = rel_path.to_string_lossy();
        for pattern in &self.ignore_patterns {
            if let Some(suffix) = pattern.strip_prefix('*') {
                if path_str.ends_with(suffix) {
                    return true;
                }
            } else if path_str.starts_with(pattern.as_str())
                || path_str.contains(&format!("/{}", pattern))
            {
                return true;
            }
        }

        rel_path.components().any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(|name| name == "node_modules" || (name.starts_with('.') && name != "." && name != ".."))
        })
    }
}

/// Recursive watcher forwarding relevant changes over a channel.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Start watching `filter`'s root directory.
    ///
    /// # Errors
    ///
    /// Returns error if watcher cannot be created or directory doesn't exist
    pub fn new(filter: WatchFilter) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        let root = filter.root.clone();
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = %err, "file watcher error");
                    return;
                }
            };
            for path in &event.paths {
                if filter.should_ignore(path) {
                    continue;
                }
                let Some(change) = FileChange::from_event(&event.kind, path) else {
                    continue;
                };
                // The receiver is gone once the dev loop shuts down
                let _ = tx.blocking_send(change);
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
