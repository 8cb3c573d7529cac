//! Integration tests for the `labradorite` binary.
//!
//! Every test builds its own document store in a temp directory; nothing
//! reads the user's configuration or binds a socket.
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the binary with env isolation.
///
/// Clears all `LABRADORITE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn labradorite_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("labradorite");
    cmd.env("HOME", "/tmp/labradorite-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/labradorite-cli-test-nonexistent")
        .env_remove("LABRADORITE_CONFIG")
        .env_remove("LABRADORITE_DATA__ROOT")
        .env_remove("LABRADORITE_DATA__MAPPINGS_DIR")
        .env_remove("LABRADORITE_DATA__LOAD_POLICY")
        .env_remove("LABRADORITE_LOOKUP__STRICT")
        .env_remove("LABRADORITE_SERVER__HOST")
        .env_remove("LABRADORITE_SERVER__PORT")
        .env_remove("RUST_LOG");
    cmd
}

/// Same, with `--data-dir` pointing at `root`.
fn with_data(root: &Path) -> assert_cmd::Command {
    let mut cmd = labradorite_cmd();
    cmd.arg("--data-dir").arg(root);
    cmd
}

fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

fn dataset() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_json(
        &root.join("iphone/d94ap.json"),
        &json!({
            "boardconfig": "D94AP",
            "models": ["A3084"],
            "identifiers": ["iPhone17,2"],
            "chips": {"soc": {"name": "A18 Pro", "cores": 6}}
        }),
    );
    write_json(
        &root.join("mappings/boardconfigs.json"),
        &json!({"d94ap": "iphone/d94ap.json"}),
    );
    write_json(
        &root.join("mappings/models.json"),
        &json!({"a3084": "iphone/d94ap.json"}),
    );
    write_json(
        &root.join("mappings/identifiers.json"),
        &json!({"iphone17,2": "iphone/d94ap.json"}),
    );
    dir
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = labradorite_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    labradorite_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("serve")
            .and(predicate::str::contains("lookup"))
            .and(predicate::str::contains("generate-mappings")),
    );
}

#[test]
fn test_version_flag() {
    labradorite_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("labradorite"));
}

#[test]
fn test_completions_bash() {
    labradorite_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_unknown_category_is_usage_error() {
    let dir = dataset();
    with_data(dir.path())
        .args(["lookup", "gadget", "d94ap"])
        .assert()
        .code(2);
}

// ── Lookup ──────────────────────────────────────────────────────────

#[test]
fn test_lookup_full_document() {
    let dir = dataset();
    let output = with_data(dir.path())
        .args(["lookup", "boardconfig", "D94AP"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["boardconfig"], json!("D94AP"));
}

#[test]
fn test_lookup_drills_into_subkeys() {
    let dir = dataset();
    let output = with_data(dir.path())
        .args(["get", "id", "IPHONE17,2", "chips", "soc", "-o", "json-compact"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"cores":6,"name":"A18 Pro"}"#
    );
}

#[test]
fn test_lookup_yaml() {
    let dir = dataset();
    with_data(dir.path())
        .args(["lookup", "model", "a3084", "chips", "soc", "name", "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A18 Pro"));
}

#[test]
fn test_lookup_unknown_device_exits_not_found() {
    let dir = dataset();
    with_data(dir.path())
        .args(["lookup", "boardconfig", "zzzz"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("zzzz"));
}

#[test]
fn test_lookup_missing_key_exits_not_found() {
    let dir = dataset();
    with_data(dir.path())
        .args(["lookup", "boardconfig", "d94ap", "chips", "gpu"])
        .assert()
        .code(4);
}

#[test]
fn test_strict_lookup_fails_on_scalar() {
    let dir = dataset();
    let args = ["lookup", "boardconfig", "d94ap", "chips", "soc", "name", "first"];

    // Lenient stops at the string.
    let output = with_data(dir.path()).args(args).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!("A18 Pro"));

    with_data(dir.path())
        .args(args)
        .arg("--strict")
        .assert()
        .code(2);
}

#[test]
fn test_quiet_suppresses_output() {
    let dir = dataset();
    with_data(dir.path())
        .args(["-q", "lookup", "boardconfig", "d94ap"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ── Loading ─────────────────────────────────────────────────────────

#[test]
fn test_check_reports_counts() {
    let dir = dataset();
    let output = with_data(dir.path()).arg("check").output().unwrap();
    assert!(output.status.success());

    let report = stdout_json(&output);
    assert_eq!(report["policy"], json!("fail-fast"));
    assert_eq!(report["categories"]["model"]["cached"], json!(1));
}

#[test]
fn test_missing_mapping_file_exits_data_error() {
    let dir = dataset();
    fs::remove_file(dir.path().join("mappings/models.json")).unwrap();
    with_data(dir.path())
        .arg("check")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("generate-mappings"));
}

#[test]
fn test_skip_invalid_serves_healthy_entries() {
    let dir = dataset();
    write_json(
        &dir.path().join("mappings/models.json"),
        &json!({"a3084": "iphone/d94ap.json", "a9999": "gone/missing.json"}),
    );

    with_data(dir.path()).arg("check").assert().code(5);

    let output = with_data(dir.path())
        .args(["--load-policy", "skip-invalid", "check"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["categories"]["model"]["mapped"], json!(2));
    assert_eq!(report["categories"]["model"]["cached"], json!(1));

    with_data(dir.path())
        .args(["--load-policy", "skip-invalid", "lookup", "model", "a9999"])
        .assert()
        .code(5);
}

#[test]
fn test_config_file_supplies_data_root() {
    let dir = dataset();
    let config = dir.path().join("labradorite.toml");
    fs::write(
        &config,
        format!("[data]\nroot = {:?}\n", dir.path().display().to_string()),
    )
    .unwrap();

    labradorite_cmd()
        .arg("--config")
        .arg(&config)
        .args(["lookup", "model", "A3084", "chips", "soc", "cores"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6"));
}

#[test]
fn test_missing_config_file_exits_config_error() {
    labradorite_cmd()
        .args(["--config", "/tmp/labradorite-cli-test-nonexistent/absent.toml"])
        .args(["config", "show"])
        .assert()
        .code(3);
}

#[test]
fn test_config_show_defaults() {
    labradorite_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[server]")
                .and(predicate::str::contains("port = 8080"))
                .and(predicate::str::contains("load_policy = \"fail-fast\"")),
        );
}

// ── Mapping generation ──────────────────────────────────────────────

#[test]
fn test_generate_mappings_round_trip() {
    let dir = dataset();
    fs::remove_dir_all(dir.path().join("mappings")).unwrap();

    labradorite_cmd()
        .arg("generate-mappings")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexed 1 documents"));

    let models: Value =
        serde_json::from_slice(&fs::read(dir.path().join("mappings/models.json")).unwrap())
            .unwrap();
    assert_eq!(models, json!({"a3084": "iphone/d94ap.json"}));

    with_data(dir.path())
        .args(["lookup", "identifier", "iphone17,2", "boardconfig"])
        .assert()
        .success()
        .stdout(predicate::str::contains("D94AP"));
}
