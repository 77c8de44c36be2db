//! Application mode, read from `APP_ENV`.

use std::fmt;

/// Environment variable selecting the mode.
pub const APP_ENV: &str = "APP_ENV";

/// How the application is being built and run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    Production,
    Test,
    #[default]
    Development,
}

impl AppMode {
    /// Read the mode from `APP_ENV`. Anything other than `production` or
    /// `test` is development.
    pub fn from_env() -> Self {
        Self::parse(std::env::var(APP_ENV).ok().as_deref())
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("production") => AppMode::Production,
            Some("test") => AppMode::Test,
            _ => AppMode::Development,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppMode::Production => "production",
            AppMode::Test => "test",
            AppMode::Development => "development",
        }
    }

    /// Name of the bundle directory inside the public directory.
    pub fn build_dir_name(self) -> &'static str {
        match self {
            AppMode::Test => "test-build",
            _ => "build",
        }
    }

    pub fn is_production(self) -> bool {
        self == AppMode::Production
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
