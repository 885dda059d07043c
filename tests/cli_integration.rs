//! Integration tests for the `mx` binary's argument handling.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mx() -> Command {
    Command::cargo_bin("mx").expect("binary built")
}

#[test]
fn tree_argument_is_required() {
    mx().assert()
        .failure()
        .stderr(predicate::str::contains("<TREE>"));
}

#[test]
fn help_describes_the_export() {
    mx().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("design-model"))
        .stdout(predicate::str::contains("BRANCH"));
}

#[test]
fn version_prints() {
    mx().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mx"));
}

#[test]
fn unconfigured_source_fails_with_guidance() {
    // Point MODELEX_CONFIG at a path that does not exist so the run is
    // isolated from any real user configuration.
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    mx().arg("some-tree")
        .env("MODELEX_CONFIG", &missing)
        .env_remove("MODELEX_TOKEN")
        .assert()
        .failure()
        .stderr(predicate::str::contains("source not configured"));
}
