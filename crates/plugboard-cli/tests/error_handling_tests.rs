//! Tests for error handling and suggestions.

use std::fs;
use std::path::Path;

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

fn check(dir: &Path, manifest: &str) -> Command {
    let config = dir.join("plugboard.toml");
    fs::write(&config, "[registry]\nbuiltins = true\n").unwrap();
    let path = dir.join("manifest.toml");
    fs::write(&path, manifest).unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("plugboard");
    cmd.env("NO_COLOR", "1")
        .arg("--config")
        .arg(config)
        .arg("check")
        .arg(path);
    cmd
}

#[test]
fn test_error_missing_capability() {
    let temp = TempDir::new().unwrap();
    check(
        temp.path(),
        "[plugins.tap.event_types.tap]\nregistration_name = \"onTap\"\n",
    )
    .assert()
    .code(4)
    .stderr(predicate::str::contains("tap"))
    .stderr(predicate::str::contains("Suggestions:"))
    .stderr(predicate::str::contains("extractor"));
}

#[test]
fn test_error_registration_name_collision() {
    let temp = TempDir::new().unwrap();
    check(
        temp.path(),
        r#"
[plugins.tap]
extractor = "dispatch"

[plugins.tap.event_types.tap]
registration_name = "onClick"
"#,
    )
    .assert()
    .code(4)
    .stderr(predicate::str::contains("onClick"));
}

#[test]
fn test_error_plugin_outside_ordering() {
    let temp = TempDir::new().unwrap();
    check(
        temp.path(),
        "[plugins.gesture]\nextractor = \"noop\"\n",
    )
    .assert()
    .code(4)
    .stderr(predicate::str::contains("gesture"));
}

#[test]
fn test_error_unknown_extractor() {
    let temp = TempDir::new().unwrap();
    check(temp.path(), "[plugins.tap]\nextractor = \"telepathy\"\n")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("telepathy"))
        .stderr(predicate::str::contains("dispatch, noop"));
}

#[test]
fn test_error_invalid_toml() {
    let temp = TempDir::new().unwrap();
    check(temp.path(), "order = [")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid plugin manifest"));
}

#[test]
fn test_error_second_ordering() {
    let temp = TempDir::new().unwrap();
    // builtins keep their ordering only when no manifest brings one, so two
    // manifests are needed to collide
    let config = temp.path().join("plugboard.toml");
    fs::write(&config, "[registry]\nbuiltins = false\n").unwrap();
    let a = temp.path().join("a.toml");
    let b = temp.path().join("b.toml");
    fs::write(&a, "order = [\"a\"]\n").unwrap();
    fs::write(&b, "order = [\"b\"]\n").unwrap();

    cargo::cargo_bin_cmd!("plugboard")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&a)
        .arg(&b)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ordering"));
}

#[test]
fn test_error_manifest_not_found() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("plugboard.toml");
    fs::write(&config, "").unwrap();

    cargo::cargo_bin_cmd!("plugboard")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(&config)
        .args(["inspect", "--manifest"])
        .arg(temp.path().join("missing.toml"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Manifest not found"));
}

#[test]
fn test_error_unknown_subcommand_exits_2() {
    cargo::cargo_bin_cmd!("plugboard")
        .arg("frobnicate")
        .assert()
        .code(2);
}

#[test]
fn test_error_empty_registration_name_exits_2() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("plugboard.toml");
    fs::write(&config, "").unwrap();

    cargo::cargo_bin_cmd!("plugboard")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(&config)
        .args(["resolve", " "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid input"));
}
