//! Integration tests for the config subcommands.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;

/// `config path` honors MOYEO_HOME.
#[test]
fn test_config_path_uses_moyeo_home() {
    let temp = tempdir().unwrap();

    Command::cargo_bin("moyeo")
        .unwrap()
        .env("MOYEO_HOME", temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"))
        .stdout(predicate::str::contains(temp.path().to_str().unwrap()));
}

/// `config init` writes the commented template; a second run refuses.
#[test]
fn test_config_init_creates_template_once() {
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("config.toml");

    Command::cargo_bin("moyeo")
        .unwrap()
        .env("MOYEO_HOME", temp.path())
        .args(["config", "init"])
        .assert()
        .success();

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url"));

    Command::cargo_bin("moyeo")
        .unwrap()
        .env("MOYEO_HOME", temp.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

/// `config set-url` persists the URL and is readable back.
#[test]
fn test_config_set_url_persists() {
    let temp = tempdir().unwrap();

    Command::cargo_bin("moyeo")
        .unwrap()
        .env("MOYEO_HOME", temp.path())
        .args(["config", "set-url", "http://10.0.0.5:4000/"])
        .assert()
        .success();

    let contents = fs::read_to_string(temp.path().join("config.toml")).unwrap();
    // trailing slash is stripped before saving
    assert!(contents.contains("http://10.0.0.5:4000"));
    assert!(!contents.contains("http://10.0.0.5:4000/\""));
}
