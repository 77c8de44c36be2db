use crate::config::{ArborConfig, CONFIG_FILE_NAME};
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use std::path::{Path, PathBuf};

/// Top-level keys that may be set through `ARBOR_*` variables.
const ENV_KEYS: &[&str] = &[
    "entryPoint",
    "routes",
    "publicDir",
    "cwd",
    "bundler",
    "formatter",
    "hooks",
    "emit",
    "dev",
];

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
}

impl ArborConfig {
    /// Load configuration for the project in `cwd`.
    ///
    /// An explicit `config_path` must exist; otherwise `arbor.config.json` in
    /// `cwd` is used when present.
    pub fn load(cwd: &Path, config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(ArborConfig::default()));

        if let Some(path) = Self::config_file(cwd, config_path)? {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        // ARBOR_ENTRY_POINT, ARBOR_DEV__PORT, ...
        figment = figment.merge(
            Env::prefixed("ARBOR_")
                .lowercase(false)
                .filter_map(|key| env_key_path(key.as_str()).map(Into::into)),
        );

        let mut config: ArborConfig = figment
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()))?;

        if let Some(port) = overrides.port {
            config.dev.port = port;
        }

        Ok(config)
    }

    fn config_file(cwd: &Path, config_path: Option<&Path>) -> Result<Option<PathBuf>> {
        match config_path {
            Some(path) => {
                let path = crate::commands::utils::resolve_path(path, cwd);
                if path.is_file() {
                    Ok(Some(path))
                } else {
                    Err(ConfigError::NotFound(path).into())
                }
            }
            None => {
                let default_path = cwd.join(CONFIG_FILE_NAME);
                Ok(default_path.is_file().then_some(default_path))
            }
        }
    }
}

/// Map an `ARBOR_`-stripped variable name to a config key path.
///
/// Nesting uses `__` and words use `_`: `DEV__DEBOUNCE_MS` becomes
/// `dev.debounceMs`. Unknown top-level keys yield `None`.
pub fn env_key_path(name: &str) -> Option<String> {
    let path: Vec<String> = name.split("__").map(camel_case).collect();
    let top = path.first()?;
    if !ENV_KEYS.contains(&top.as_str()) {
        return None;
    }
    Some(path.join("."))
}

fn camel_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for (i, word) in segment.split('_').filter(|w| !w.is_empty()).enumerate() {
        let word = word.to_ascii_lowercase();
        if i == 0 {
            out.push_str(&word);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}
