//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("warbler").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("reset-db"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("warbler").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--secret-key"))
        .stdout(predicate::str::contains("--max-connections"))
        .stdout(predicate::str::contains("127.0.0.1:5000"));
}

#[test]
fn test_secret_default_is_hidden() {
    let mut cmd = Command::cargo_bin("warbler").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("it's a secret").not());
}

#[test]
fn test_reset_db_help() {
    let mut cmd = Command::cargo_bin("warbler").unwrap();
    cmd.arg("reset-db").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Drop all tables"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("warbler").unwrap();
    cmd.arg("frobnicate");

    cmd.assert().failure();
}
