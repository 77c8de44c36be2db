use crate::config::ArborConfig;
use crate::error::{ConfigError, Result};

fn empty_command(field: &str, hint: &str) -> crate::error::CliError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: "[]".to_string(),
        hint: hint.to_string(),
    }
    .into()
}

impl ArborConfig {
    /// Reject configs that would only fail later, mid-build or at app launch.
    pub fn validate(&self) -> Result<()> {
        if self.entry_point.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "entryPoint".to_string(),
                hint: "Set the client entry point, e.g. \"app.tsx\"".to_string(),
            }
            .into());
        }

        if self.routes.is_empty() {
            return Err(ConfigError::MissingField {
                field: "routes".to_string(),
                hint: "Provide at least one route directory, e.g. [\"routes\"]".to_string(),
            }
            .into());
        }

        if self.bundler.command.is_empty() {
            return Err(empty_command(
                "bundler.command",
                "Provide the bundler executable, e.g. [\"esbuild\"]",
            ));
        }

        if let Some(plugin) = self.bundler.plugins.iter().find(|p| p.name.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "bundler.plugins".to_string(),
                value: format!("{:?}", plugin.args),
                hint: "Every plugin needs a name".to_string(),
            }
            .into());
        }

        if self.formatter.enabled && self.formatter.command.is_empty() {
            return Err(empty_command(
                "formatter.command",
                "Provide a formatter command or set formatter.enabled to false",
            ));
        }

        for (field, command) in [
            ("hooks.preBuild", &self.hooks.pre_build),
            ("hooks.postBuild", &self.hooks.post_build),
        ] {
            if command.as_ref().is_some_and(|c| c.is_empty()) {
                return Err(empty_command(field, "Remove the hook or give it a command"));
            }
        }

        if self.dev.app_command.is_empty() {
            return Err(empty_command(
                "dev.appCommand",
                "Provide the command that starts your app, e.g. [\"deno\", \"run\", \"-A\", \"./main.ts\"]",
            ));
        }

        if self.dev.debounce_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dev.debounceMs".to_string(),
                value: "0".to_string(),
                hint: "Use a debounce window of at least 1ms".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
