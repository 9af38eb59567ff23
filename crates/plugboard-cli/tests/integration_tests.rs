//! Integration tests for plugboard-cli.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

const TAP: &str = r#"
[plugins.tap]
extractor = "dispatch"
description = "Touch taps"

[plugins.tap.event_types.tap]
registration_name = "onTap"
"#;

/// A config file in `dir` so tests never pick up the user's own.
fn plugboard(dir: &Path) -> Command {
    let config = dir.join("plugboard.toml");
    if !config.exists() {
        fs::write(&config, "[registry]\nbuiltins = true\n").unwrap();
    }
    let mut cmd = cargo::cargo_bin_cmd!("plugboard");
    cmd.env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config);
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_help_flag() {
    cargo::cargo_bin_cmd!("plugboard")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_version_flag() {
    cargo::cargo_bin_cmd!("plugboard")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_inspect_builtins() {
    let temp = TempDir::new().unwrap();
    plugboard(temp.path())
        .arg("inspect")
        .assert()
        .success()
        .stdout(predicate::str::contains("Plugin Ordering"))
        .stdout(predicate::str::contains("enter-leave"))
        .stdout(predicate::str::contains("onMouseEnter"))
        .stdout(predicate::str::contains("(empty slot)"));
}

#[test]
fn test_inspect_list_is_in_dispatch_order() {
    let temp = TempDir::new().unwrap();
    plugboard(temp.path())
        .args(["inspect", "--format", "list"])
        .assert()
        .success()
        .stdout("simple\nenter-leave\nchange\nselect\n");
}

#[test]
fn test_manifest_fills_reserved_slot() {
    let temp = TempDir::new().unwrap();
    let tap = write(temp.path(), "tap.toml", TAP);

    plugboard(temp.path())
        .args(["inspect", "--format", "list", "--manifest"])
        .arg(&tap)
        .assert()
        .success()
        .stdout("simple\ntap\nenter-leave\nchange\nselect\n");
}

#[test]
fn test_inspect_json_snapshot() {
    let temp = TempDir::new().unwrap();
    let output = plugboard(temp.path())
        .args(["inspect", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["phase"], "ordered");
    assert_eq!(snapshot["ordering"][0], "responder");
    assert_eq!(snapshot["plugins"][0]["name"], "simple");
}

#[test]
fn test_inspect_csv() {
    let temp = TempDir::new().unwrap();
    plugboard(temp.path())
        .args(["inspect", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "registration_name,plugin,event_type,phase\n",
        ))
        .stdout(predicate::str::contains("onClickCapture,simple,click,captured"))
        .stdout(predicate::str::contains("onMouseLeave,enter-leave,mouseLeave,\n"));
}

#[test]
fn test_resolve_builtin() {
    let temp = TempDir::new().unwrap();
    plugboard(temp.path())
        .args(["resolve", "onChangeCapture"])
        .assert()
        .success()
        .stdout("change\n");
}

#[test]
fn test_resolve_json() {
    let temp = TempDir::new().unwrap();
    plugboard(temp.path())
        .args(["--output-format", "json", "resolve", "onClick"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""plugin":"simple""#));
}

#[test]
fn test_resolve_unknown_exits_3() {
    let temp = TempDir::new().unwrap();
    plugboard(temp.path())
        .args(["resolve", "onTap"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No plugin registers 'onTap'"));
}

#[test]
fn test_check_accepts_valid_manifest() {
    let temp = TempDir::new().unwrap();
    let tap = write(temp.path(), "tap.toml", TAP);

    plugboard(temp.path())
        .arg("check")
        .arg(&tap)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 manifest(s) OK"));
}

#[test]
fn test_check_walks_directories() {
    let temp = TempDir::new().unwrap();
    let plugins = temp.path().join("plugins");
    fs::create_dir(&plugins).unwrap();
    write(&plugins, "tap.toml", TAP);

    plugboard(temp.path())
        .arg("check")
        .arg(&plugins)
        .assert()
        .success();
}

#[test]
fn test_simulate_mouseout() {
    let temp = TempDir::new().unwrap();
    plugboard(temp.path())
        .args(["simulate", "mouseout", "--target", "div#menu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mouseLeave"))
        .stdout(predicate::str::contains("onMouseEnter"))
        .stdout(predicate::str::contains("enter-leave"));
}

#[test]
fn test_simulate_json_carries_target() {
    let temp = TempDir::new().unwrap();
    let output = plugboard(temp.path())
        .args(["--output-format", "json", "simulate", "click", "-t", "button"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let events: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let events = events.as_array().unwrap();
    // simple and change both react to click
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["plugin"], "simple");
    assert_eq!(events[0]["event"]["target"], "button");
    assert_eq!(events[1]["plugin"], "change");
}

#[test]
fn test_simulate_nothing_extracted() {
    let temp = TempDir::new().unwrap();
    plugboard(temp.path())
        .args(["simulate", "scroll"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plugin extracts 'scroll'"));
}

#[test]
fn test_init_writes_config_then_refuses() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested").join("config.toml");
    let init = || {
        let mut cmd = cargo::cargo_bin_cmd!("plugboard");
        cmd.env("NO_COLOR", "1").arg("--config").arg(&target).arg("init");
        cmd
    };

    init()
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));
    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("builtins = true"));
    assert!(written.contains("format = \"table\""));

    init()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    init().arg("--force").assert().success();
}

#[test]
fn test_runs_without_any_config_file() {
    let temp = TempDir::new().unwrap();
    cargo::cargo_bin_cmd!("plugboard")
        .env_remove("RUST_LOG")
        .env_remove("PLUGBOARD_CONFIG")
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("NO_COLOR", "1")
        .args(["inspect", "--format", "list"])
        .assert()
        .success()
        .stdout("simple\nenter-leave\nchange\nselect\n");
}

#[test]
fn test_missing_explicit_config_exits_4() {
    let temp = TempDir::new().unwrap();
    cargo::cargo_bin_cmd!("plugboard")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(temp.path().join("absent.toml"))
        .arg("inspect")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_get_and_env_override() {
    let temp = TempDir::new().unwrap();
    plugboard(temp.path())
        .args(["config", "get", "registry.builtins"])
        .assert()
        .success()
        .stdout("true\n");

    plugboard(temp.path())
        .env("PLUGBOARD__REGISTRY__BUILTINS", "false")
        .args(["config", "get", "registry.builtins"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn test_config_disables_builtins() {
    let temp = TempDir::new().unwrap();
    plugboard(temp.path())
        .env("PLUGBOARD__REGISTRY__BUILTINS", "false")
        .args(["inspect", "--format", "list"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_quiet_flag() {
    let temp = TempDir::new().unwrap();
    let tap = write(temp.path(), "tap.toml", TAP);

    plugboard(temp.path())
        .arg("-q")
        .arg("check")
        .arg(&tap)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_flag() {
    let temp = TempDir::new().unwrap();
    plugboard(temp.path())
        .args(["-v", "inspect"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO"));
}

#[test]
fn test_shell_completions() {
    cargo::cargo_bin_cmd!("plugboard")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plugboard"));
}
