#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::error::{CliError, ConfigError};
    use crate::mode::AppMode;
    use serial_test::serial;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ArborConfig::default();
        assert_eq!(config.entry_point, "app.tsx");
        assert_eq!(config.routes, vec![PathBuf::from("routes")]);
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.dev.port, 9002);
        assert_eq!(config.dev.debounce_ms, 20);
        assert_eq!(config.dev.app_command, vec!["deno", "run", "-A", "./main.ts"]);
        assert!(config.formatter.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json_val = serde_json::to_value(ArborConfig::default()).unwrap();
        assert!(json_val.get("entryPoint").is_some());
        assert!(json_val.get("publicDir").is_some());
        assert!(json_val["dev"].get("debounceMs").is_some());
        assert!(json_val.get("entry_point").is_none());
        assert!(json_val.get("cwd").is_none());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<ArborConfig, _> = serde_json::from_str(r#"{ "entry": "app.tsx" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: ArborConfig =
            serde_json::from_str(r#"{ "dev": { "port": 9100 }, "formatter": { "enabled": false } }"#)
                .unwrap();
        assert_eq!(config.dev.port, 9100);
        assert_eq!(config.dev.debounce_ms, 20);
        assert!(!config.formatter.enabled);
        assert_eq!(config.formatter.command, default_formatter_command());
    }

    #[test]
    fn test_validation() {
        let invalid = [
            ArborConfig {
                routes: vec![],
                ..ArborConfig::default()
            },
            ArborConfig {
                entry_point: " ".to_string(),
                ..ArborConfig::default()
            },
            ArborConfig {
                dev: DevSettings {
                    debounce_ms: 0,
                    ..DevSettings::default()
                },
                ..ArborConfig::default()
            },
            ArborConfig {
                dev: DevSettings {
                    app_command: vec![],
                    ..DevSettings::default()
                },
                ..ArborConfig::default()
            },
            ArborConfig {
                hooks: HooksConfig {
                    pre_build: Some(vec![]),
                    post_build: None,
                },
                ..ArborConfig::default()
            },
            ArborConfig {
                bundler: BundlerConfig {
                    plugins: vec![PluginSpec {
                        name: String::new(),
                        args: vec![],
                    }],
                    ..BundlerConfig::default()
                },
                ..ArborConfig::default()
            },
        ];
        for config in invalid {
            assert!(config.validate().is_err(), "{config:?}");
        }

        // An empty formatter command is fine while the formatter is disabled
        let config = ArborConfig {
            formatter: FormatterConfig {
                enabled: false,
                command: vec![],
            },
            ..ArborConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config_file_parses() {
        let config: ArborConfig = serde_json::from_str(
            r#"{
                "entryPoint": "client.tsx",
                "routes": ["routes", "admin/routes"],
                "hooks": { "preBuild": ["deno", "task", "css"] },
                "bundler": { "jsxImportSource": "preact" },
                "dev": { "debounceMs": 50 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.entry_point, "client.tsx");
        assert_eq!(config.routes.len(), 2);
        assert_eq!(
            config.hooks.pre_build.as_deref(),
            Some(&["deno".to_string(), "task".to_string(), "css".to_string()][..])
        );
        assert_eq!(config.bundler.jsx_import_source.as_deref(), Some("preact"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_key_path() {
        assert_eq!(env_key_path("ENTRY_POINT").as_deref(), Some("entryPoint"));
        assert_eq!(env_key_path("DEV__DEBOUNCE_MS").as_deref(), Some("dev.debounceMs"));
        assert_eq!(env_key_path("DEV__PORT").as_deref(), Some("dev.port"));
        assert_eq!(env_key_path("UNRELATED"), None);
    }

    #[test]
    #[serial]
    fn test_load_file_then_env_then_cli() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "entryPoint": "client.tsx", "dev": { "port": 9100, "debounceMs": 50 } }"#,
        )
        .unwrap();

        let config = ArborConfig::load(temp.path(), None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.entry_point, "client.tsx");
        assert_eq!(config.dev.port, 9100);

        unsafe { std::env::set_var("ARBOR_DEV__DEBOUNCE_MS", "75"); }
        let config = ArborConfig::load(temp.path(), None, &ConfigOverrides { port: Some(9200) });
        unsafe { std::env::remove_var("ARBOR_DEV__DEBOUNCE_MS"); }
        let config = config.unwrap();

        assert_eq!(config.dev.debounce_ms, 75);
        assert_eq!(config.dev.port, 9200);
    }

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ArborConfig::load(temp.path(), None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, ArborConfig::default());
    }

    #[test]
    #[serial]
    fn test_explicit_missing_config_file() {
        let temp = TempDir::new().unwrap();
        let err = ArborConfig::load(
            temp.path(),
            Some(Path::new("missing.json")),
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    #[serial]
    fn test_invalid_field_type() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), r#"{ "routes": "routes" }"#).unwrap();
        let err = ArborConfig::load(temp.path(), None, &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Extract(_))));
    }

    #[test]
    fn test_project_paths() {
        let config = ArborConfig {
            routes: vec![PathBuf::from("routes"), PathBuf::from("admin/routes")],
            ..ArborConfig::default()
        };
        let cwd = Path::new("/project");

        let paths = ProjectPaths::resolve(&config, cwd, AppMode::Development);
        assert_eq!(paths.entry_point, PathBuf::from("/project/app.tsx"));
        assert_eq!(paths.out_dir, PathBuf::from("/project/public/build"));
        assert_eq!(paths.route_roots[1], PathBuf::from("/project/admin/routes"));
        assert_eq!(paths.artifacts().len(), 4);
        assert!(paths
            .artifacts()
            .contains(&PathBuf::from("/project/routes/_main.tsx")));

        let paths = ProjectPaths::resolve(&config, cwd, AppMode::Test);
        assert_eq!(paths.out_dir, PathBuf::from("/project/public/test-build"));
    }
}
