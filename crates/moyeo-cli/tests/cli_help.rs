use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_help_shows_all_commands() {
    Command::cargo_bin("moyeo")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("stores"))
        .stdout(predicate::str::contains("meetings"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("notifications"));
}

#[test]
fn test_meetings_help_shows_subcommands() {
    Command::cargo_bin("moyeo")
        .unwrap()
        .args(["meetings", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("join"))
        .stdout(predicate::str::contains("order"))
        .stdout(predicate::str::contains("complete"))
        .stdout(predicate::str::contains("cancel-item"));
}

#[test]
fn test_join_help_shows_item_spec() {
    Command::cargo_bin("moyeo")
        .unwrap()
        .args(["meetings", "join", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("menuId:quantity[:shared]"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("moyeo")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
