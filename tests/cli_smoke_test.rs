//! CLI surface smoke tests
//!
//! These only exercise parsing and early validation paths; anything that
//! would hit the network or keyring is covered by the wiremock suites.

use assert_cmd::Command;
use predicates::prelude::*;

fn msqadm() -> Command {
    let mut cmd = Command::cargo_bin("msqadm").unwrap();
    // Keep test runs away from the operator's real preference file.
    let dir = std::env::temp_dir().join(format!("msqadm-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    cmd.env("MSQADM_PREFS_PATH", dir.join("prefs.json"));
    cmd
}

#[test]
fn test_help_lists_commands() {
    msqadm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("deposits"))
        .stdout(predicate::str::contains("timezone"));
}

#[test]
fn test_unknown_entity_fails_before_any_request() {
    msqadm()
        .args(["list", "warehouses"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown entity"));
}

#[test]
fn test_invalid_date_flag_rejected() {
    msqadm()
        .args(["list", "news", "--from", "01-31-2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}

#[test]
fn test_timezone_round_trip() {
    msqadm()
        .args(["timezone", "Asia/Seoul"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asia/Seoul"));

    msqadm()
        .args(["timezone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asia/Seoul"));
}

#[test]
fn test_malformed_timezone_rejected() {
    msqadm()
        .args(["timezone", "not a zone"])
        .assert()
        .failure();
}
