//! Development loop configuration.

use crate::config::{ArborConfig, ProjectPaths};
use crate::error::{ConfigError, Result};
use crate::mode::AppMode;
use std::net::SocketAddr;
use std::time::Duration;

/// Port variable honoured when `--port` is not given.
pub const DEV_PORT_ENV: &str = "DEV_PORT";

/// Settings for one `arbor dev` run.
#[derive(Debug, Clone)]
pub struct DevConfig {
    pub paths: ProjectPaths,
    pub mode: AppMode,

    /// Live-reload server address
    pub addr: SocketAddr,

    pub app_command: Vec<String>,

    /// Quiet window before a burst of changes becomes a build
    pub debounce: Duration,

    /// Extra watch ignore patterns
    pub watch_ignore: Vec<String>,
}

impl DevConfig {
    pub fn new(config: &ArborConfig, paths: ProjectPaths, mode: AppMode) -> Self {
        Self {
            paths,
            mode,
            addr: SocketAddr::from(([127, 0, 0, 1], config.dev.port)),
            app_command: config.dev.app_command.clone(),
            debounce: Duration::from_millis(config.dev.debounce_ms),
            watch_ignore: config.dev.ignore.clone(),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Read `DEV_PORT`, ignoring it when unset.
    pub fn port_from_env() -> Result<Option<u16>> {
        match std::env::var(DEV_PORT_ENV) {
            Ok(value) if !value.trim().is_empty() => parse_port(&value).map(Some),
            _ => Ok(None),
        }
    }
}

fn parse_port(value: &str) -> Result<u16> {
    match value.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidValue {
            field: DEV_PORT_ENV.to_string(),
            value: value.to_string(),
            hint: "Use a port number between 1 and 65535".to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::Path;

    #[test]
    fn test_from_config() {
        let config = ArborConfig::default();
        let paths = ProjectPaths::resolve(&config, Path::new("/project"), AppMode::Development);
        let dev = DevConfig::new(&config, paths, AppMode::Development);

        assert_eq!(dev.server_url(), "http://127.0.0.1:9002");
        assert_eq!(dev.debounce, Duration::from_millis(20));
        assert_eq!(dev.paths.out_dir, Path::new("/project/public/build"));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("9100").unwrap(), 9100);
        assert!(parse_port("0").is_err());
        assert!(parse_port("http").is_err());
    }

    #[test]
    #[serial]
    fn test_port_from_env() {
        unsafe { std::env::remove_var(DEV_PORT_ENV); }
        assert_eq!(DevConfig::port_from_env().unwrap(), None);

        unsafe { std::env::set_var(DEV_PORT_ENV, "9300"); }
        let port = DevConfig::port_from_env();
        unsafe { std::env::remove_var(DEV_PORT_ENV); }
        assert_eq!(port.unwrap(), Some(9300));
    }
}
