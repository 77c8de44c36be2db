//! Error types for route tree compilation

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning a route root or writing its artifacts
#[derive(Error, Debug, Diagnostic)]
pub enum RouteError {
    /// The configured route root does not exist or is not a directory
    #[error("Route root is not a directory: {}", .0.display())]
    #[diagnostic(
        code(arbor::routes::invalid_root),
        help("Check the 'routes' entries in arbor.config.json")
    )]
    InvalidRoot(PathBuf),

    /// Walking the route root failed
    #[error("Failed to scan {}: {reason}", path.display())]
    #[diagnostic(code(arbor::routes::scan_failed))]
    Scan { path: PathBuf, reason: String },

    /// A scanned file could not be expressed relative to its route root
    #[error("Route file escapes its root: {}", .0.display())]
    #[diagnostic(code(arbor::routes::outside_root))]
    OutsideRoot(PathBuf),

    /// The formatter rejected or failed on a generated artifact
    #[error("Formatting failed for {}: {reason}", path.display())]
    #[diagnostic(
        code(arbor::routes::format_failed),
        help("The artifact was not written. Fix the formatter setup or disable it in arbor.config.json")
    )]
    Format { path: PathBuf, reason: String },

    /// Writing a generated artifact failed
    #[error("Failed to write {}: {source}", path.display())]
    #[diagnostic(code(arbor::routes::write_failed))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more artifacts of a route root failed to be written
    #[error("{failed} of {total} route artifacts failed in {}", root.display())]
    #[diagnostic(code(arbor::routes::artifacts_failed))]
    Artifacts {
        root: PathBuf,
        failed: usize,
        total: usize,
    },
}

impl RouteError {
    /// Create a Format error
    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a Scan error
    pub fn scan(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Scan {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for route compilation
pub type Result<T> = std::result::Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_names_path() {
        let err = RouteError::format("routes/_main.tsx", "exit status 1");
        let msg = err.to_string();
        assert!(msg.contains("routes/_main.tsx"));
        assert!(msg.contains("exit status 1"));
    }

    #[test]
    fn test_invalid_root_message() {
        let err = RouteError::InvalidRoot(PathBuf::from("missing"));
        assert!(err.to_string().contains("missing"));
    }
}
