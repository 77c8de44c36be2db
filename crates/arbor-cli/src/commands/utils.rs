//! Filesystem helpers for project loading and the build cycle.

use crate::error::{BuildError, CliError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// `path` taken relative to `base`; absolute paths are returned as is.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    base.join(path)
}

/// The project directory: `dir` resolved against the process directory,
/// or the process directory itself.
pub fn project_dir(dir: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let dir = match dir {
        Some(dir) => resolve_path(dir, &cwd),
        None => cwd,
    };
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(CliError::FileNotFound(dir))
    }
}

/// The bundler entry point must exist and be a regular file.
pub fn validate_entry(entry: &Path) -> Result<()> {
    match fs::metadata(entry) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(CliError::InvalidArgument(format!(
            "Entry point is not a regular file: {}",
            entry.display()
        ))),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(BuildError::EntryNotFound(entry.to_path_buf()).into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Make `out_dir` ready for the bundler.
///
/// A missing directory is created. With `clean`, an existing one is emptied
/// in place so watchers holding the directory itself keep working.
pub fn prepare_out_dir(out_dir: &Path, clean: bool) -> Result<()> {
    match fs::metadata(out_dir) {
        Ok(meta) if !meta.is_dir() => Err(CliError::InvalidArgument(format!(
            "Output path is not a directory: {}",
            out_dir.display()
        ))),
        Ok(_) if clean => empty_dir(out_dir),
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(fs::create_dir_all(out_dir)?),
        Err(err) => Err(err.into()),
    }
}

fn empty_dir(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Symlinks are unlinked, never followed
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
