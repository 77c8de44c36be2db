//! Binary-level tests for the `arbor` executable.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn arbor() -> Command {
    let mut cmd = Command::cargo_bin("arbor").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("APP_ENV");
    cmd
}

#[test]
fn test_help_lists_commands() {
    arbor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build").and(predicate::str::contains("dev")));
}

#[test]
fn test_verbose_conflicts_with_quiet() {
    arbor().args(["--verbose", "--quiet", "build"]).assert().failure();
}

#[test]
fn test_build_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    arbor()
        .args(["build", "--cwd"])
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_build_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("arbor.config.json"), r#"{ "routes": "routes" }"#).unwrap();

    arbor()
        .args(["build", "--cwd"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_build_without_routes_exits_non_zero() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("app.tsx"), "").unwrap();
    fs::write(
        temp.path().join("arbor.config.json"),
        r#"{ "formatter": { "enabled": false } }"#,
    )
    .unwrap();

    arbor()
        .args(["build", "--cwd"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Build failed"));
}

#[cfg(unix)]
#[test]
fn test_build_succeeds_with_stub_bundler() {
    let temp = TempDir::new().unwrap();
    let routes = temp.path().join("routes");
    fs::create_dir_all(&routes).unwrap();
    fs::write(routes.join("index.tsx"), "export default function Home() {}").unwrap();
    fs::write(temp.path().join("app.tsx"), "").unwrap();
    fs::write(
        temp.path().join("arbor.config.json"),
        r#"{
            "bundler": { "command": ["true"] },
            "formatter": { "enabled": false }
        }"#,
    )
    .unwrap();

    arbor()
        .args(["build", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Build completed"));

    assert!(routes.join("_main.tsx").is_file());
    assert!(routes.join("_main.ts").is_file());
    assert!(temp.path().join("public/build").is_dir());
}
