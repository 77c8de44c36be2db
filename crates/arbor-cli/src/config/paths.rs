use crate::commands::utils::resolve_path;
use crate::config::ArborConfig;
use crate::mode::AppMode;
use std::path::{Path, PathBuf};

/// Absolute locations derived from a config and a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub cwd: PathBuf,
    pub entry_point: PathBuf,
    pub route_roots: Vec<PathBuf>,
    pub public_dir: PathBuf,
    /// `<publicDir>/build`, or `<publicDir>/test-build` in test mode
    pub out_dir: PathBuf,
}

impl ProjectPaths {
    pub fn resolve(config: &ArborConfig, cwd: &Path, mode: AppMode) -> Self {
        let public_dir = resolve_path(&config.public_dir, cwd);
        Self {
            cwd: cwd.to_path_buf(),
            entry_point: resolve_path(Path::new(&config.entry_point), cwd),
            route_roots: config
                .routes
                .iter()
                .map(|root| resolve_path(root, cwd))
                .collect(),
            out_dir: public_dir.join(mode.build_dir_name()),
            public_dir,
        }
    }

    /// Generated artifacts of every route root.
    pub fn artifacts(&self) -> Vec<PathBuf> {
        self.route_roots
            .iter()
            .flat_map(|root| arbor_routes::artifact_paths(root))
            .collect()
    }
}
