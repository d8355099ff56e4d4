//! Smoke tests for the rf binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_runs() {
    Command::cargo_bin("rf")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ravenfall"));
}

#[test]
fn bundles_lists_the_presets() {
    Command::cargo_bin("rf")
        .unwrap()
        .arg("bundles")
        .assert()
        .success()
        .stdout(predicate::str::contains("warrior"))
        .stdout(predicate::str::contains("hunter"))
        .stdout(predicate::str::contains("wanderer"));
}

#[test]
fn play_renders_the_opening_and_exits_on_eof() {
    Command::cargo_bin("rf")
        .unwrap()
        .args(["play", "--seed", "7"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hvitmark"));
}

#[test]
fn play_rejects_unknown_bundles() {
    Command::cargo_bin("rf")
        .unwrap()
        .args(["play", "--bundle", "jarl"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown stat bundle"));
}
