// crates/release-gate-cli/tests/authz_commands.rs
// ============================================================================
// Module: CLI Authz Command Tests
// Description: Integration tests for the authorization check workflow.
// Purpose: Ensure receipts, engines, and exit codes compose fail-closed.
// Dependencies: release-gate-cli binary
// ============================================================================

//! ## Overview
//! Runs the CLI binary for authorization checks: receipts arrive via the
//! `RELEASE_GATE_RECEIPT_JSON` variable or `--receipt`, the configured engine
//! decides, and any non-allow outcome exits with failure.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Environment variable carrying the verified receipt payload.
const RECEIPT_ENV: &str = "RELEASE_GATE_RECEIPT_JSON";

fn release_gate_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_release-gate"))
}

fn temp_root(label: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock drift").as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("release-gate-cli-{label}-{nanos}"));
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_dir_all(path);
}

/// Writes a runner config with the given authz section body.
fn write_config(root: &PathBuf, authz: &str) -> PathBuf {
    let config_path = root.join("release-gate.toml");
    fs::write(&config_path, authz.trim()).expect("write config");
    config_path
}

/// Receipt valid far beyond the test run.
fn ci_receipt() -> String {
    r#"{
        "receipt_id": "rcpt-ci-1",
        "actor_class": "ci",
        "scopes": ["deploy:prod"],
        "issued_at": "2020-01-01T00:00:00Z",
        "expires_at": "2099-01-01T00:00:00Z",
        "assurance_level": 2
    }"#
    .to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies the allow-all engine admits a valid receipt from the environment.
#[test]
fn cli_authz_check_allows_with_allow_all_engine() {
    let root = temp_root("authz-allow-all");
    let config_path = write_config(
        &root,
        r#"
[authz]
engine = "allow_all"
"#,
    );

    let output = Command::new(release_gate_bin())
        .args([
            "authz",
            "check",
            "--config",
            config_path.to_string_lossy().as_ref(),
            "--action",
            "deploy",
            "--resource",
            "svc-api",
            "--scope",
            "deploy:prod",
        ])
        .env(RECEIPT_ENV, ci_receipt())
        .output()
        .expect("authz check");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ALLOW"), "unexpected stdout: {stdout}");
    assert!(stdout.contains("ALLOW_ALL_ENGINE"), "unexpected stdout: {stdout}");

    cleanup(&root);
}

/// Verifies an expired receipt is rejected before the engine runs.
#[test]
fn cli_authz_check_rejects_expired_receipt() {
    let root = temp_root("authz-expired");
    let config_path = write_config(
        &root,
        r#"
[authz]
engine = "allow_all"
"#,
    );
    let receipt = r#"{
        "receipt_id": "rcpt-old",
        "actor_class": "ci",
        "issued_at": "2020-01-01T00:00:00Z",
        "expires_at": "2020-01-02T00:00:00Z"
    }"#;

    let output = Command::new(release_gate_bin())
        .args([
            "authz",
            "check",
            "--config",
            config_path.to_string_lossy().as_ref(),
            "--action",
            "deploy",
            "--resource",
            "svc-api",
            "--scope",
            "deploy:prod",
        ])
        .env(RECEIPT_ENV, receipt)
        .output()
        .expect("authz check");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expired"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("rcpt-old"), "unexpected stderr: {stderr}");

    cleanup(&root);
}

/// Verifies a static rule admits a file-based receipt carrying the required
/// scopes.
#[test]
fn cli_authz_check_static_rule_allows_receipt_file() {
    let root = temp_root("authz-static-allow");
    let config_path = write_config(
        &root,
        r#"
[authz]
engine = "static"

[authz.static]
default = "deny"

[[authz.static.rules]]
effect = "allow"
reason_code = "CI_DEPLOY"
actions = ["deploy"]
actor_classes = ["ci"]
require_scopes = ["deploy:prod"]
min_assurance_level = 2
"#,
    );
    let receipt_path = root.join("receipt.json");
    fs::write(&receipt_path, ci_receipt()).expect("write receipt");

    let output = Command::new(release_gate_bin())
        .args([
            "authz",
            "check",
            "--config",
            config_path.to_string_lossy().as_ref(),
            "--action",
            "deploy",
            "--resource",
            "svc-api",
            "--scope",
            "deploy:prod",
            "--param",
            "environment=prod",
            "--receipt",
            receipt_path.to_string_lossy().as_ref(),
        ])
        .env_remove(RECEIPT_ENV)
        .output()
        .expect("authz check");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CI_DEPLOY"), "unexpected stdout: {stdout}");

    cleanup(&root);
}

/// Verifies anonymous callers are denied when no rule opts in.
#[test]
fn cli_authz_check_denies_anonymous_caller() {
    let root = temp_root("authz-anonymous");
    let config_path = write_config(
        &root,
        r#"
[authz]
engine = "static"

[authz.static]
default = "allow"

[[authz.static.rules]]
effect = "allow"
reason_code = "CI_DEPLOY"
actions = ["deploy"]
actor_classes = ["ci"]
"#,
    );

    let output = Command::new(release_gate_bin())
        .args([
            "authz",
            "check",
            "--config",
            config_path.to_string_lossy().as_ref(),
            "--action",
            "deploy",
            "--resource",
            "svc-api",
            "--scope",
            "deploy:prod",
        ])
        .env_remove(RECEIPT_ENV)
        .output()
        .expect("authz check");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ANONYMOUS_FORBIDDEN"), "unexpected stdout: {stdout}");

    cleanup(&root);
}

/// Verifies the default engine denies everything, receipt or not.
#[test]
fn cli_authz_check_default_engine_denies() {
    let root = temp_root("authz-default-deny");
    let config_path = write_config(&root, "[limits]\nmax_receipt_bytes = 4096\n");

    let output = Command::new(release_gate_bin())
        .args([
            "authz",
            "check",
            "--config",
            config_path.to_string_lossy().as_ref(),
            "--action",
            "deploy",
            "--resource",
            "svc-api",
            "--scope",
            "deploy:prod",
        ])
        .env(RECEIPT_ENV, ci_receipt())
        .output()
        .expect("authz check");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("DENY_ALL_ENGINE"), "unexpected stdout: {stdout}");

    cleanup(&root);
}

/// Verifies an unparseable receipt in the environment aborts the check.
#[test]
fn cli_authz_check_rejects_malformed_env_receipt() {
    let root = temp_root("authz-bad-receipt");
    let config_path = write_config(
        &root,
        r#"
[authz]
engine = "allow_all"
"#,
    );

    let output = Command::new(release_gate_bin())
        .args([
            "authz",
            "check",
            "--config",
            config_path.to_string_lossy().as_ref(),
            "--action",
            "deploy",
            "--resource",
            "svc-api",
            "--scope",
            "deploy:prod",
        ])
        .env(RECEIPT_ENV, "{not json")
        .output()
        .expect("authz check");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load receipt"), "unexpected stderr: {stderr}");

    cleanup(&root);
}

/// Verifies a malformed `--param` flag is rejected before evaluation.
#[test]
fn cli_authz_check_rejects_malformed_param() {
    let root = temp_root("authz-bad-param");
    let config_path = write_config(
        &root,
        r#"
[authz]
engine = "allow_all"
"#,
    );

    let output = Command::new(release_gate_bin())
        .args([
            "authz",
            "check",
            "--config",
            config_path.to_string_lossy().as_ref(),
            "--action",
            "deploy",
            "--resource",
            "svc-api",
            "--scope",
            "deploy:prod",
            "--param",
            "oops",
        ])
        .env(RECEIPT_ENV, ci_receipt())
        .output()
        .expect("authz check");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("KEY=VALUE"), "unexpected stderr: {stderr}");

    cleanup(&root);
}
