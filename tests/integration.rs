// Integration tests for the ivf-success CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes and stdout/stderr output.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs the binary from an empty directory with an isolated HOME so no
/// developer config leaks in.
fn ivf_success(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ivf-success").expect("binary should exist");
    cmd.current_dir(home.path()).env("HOME", home.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_version_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    ivf_success(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ivf-success"));
}

#[test]
fn cli_help_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    ivf_success(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("IVF success probability"));
}

#[test]
fn score_without_table_is_runtime_failure() {
    let home = TempDir::new().expect("temp dir should be created");
    ivf_success(&home)
        .args(["score", "age=35"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no coefficient table configured"));
}

#[test]
fn quiet_conflicts_with_verbose() {
    let home = TempDir::new().expect("temp dir should be created");
    ivf_success(&home)
        .args(["-q", "-v", "formulas"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn missing_table_file_is_runtime_failure() {
    let home = TempDir::new().expect("temp dir should be created");
    ivf_success(&home)
        .args(["formulas", "--table", "does-not-exist.csv"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("coefficient table unavailable"));
}

#[test]
fn invalid_config_is_runtime_failure() {
    let home = TempDir::new().expect("temp dir should be created");
    std::fs::write(
        home.path().join("ivf-success.toml"),
        r#"
[output]
format = "xml"
"#,
    )
    .expect("config should write");

    ivf_success(&home)
        .arg("formulas")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unsupported output.format"));
}
