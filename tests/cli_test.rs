// file: tests/cli_test.rs
// version: 1.0.0
// guid: 091a2b3c-4c5d-46e7-f809-901a2b3c4d5b

//! Command line smoke tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn agent(temp: &Path) -> Command {
    let mut cmd = Command::cargo_bin("host-admin-agent").unwrap();
    cmd.env("HOME", temp)
        .env("XDG_CONFIG_HOME", temp.join("config"))
        .env("HOST_ADMIN_MODULES_FILE", temp.join("modules.yml"))
        .env_remove("HOST_ADMIN_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_command_groups() {
    let temp = TempDir::new().unwrap();
    agent(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("module"))
        .stdout(predicate::str::contains("ssh"));
}

#[test]
fn test_module_add_list_remove() {
    let temp = TempDir::new().unwrap();

    agent(temp.path())
        .args(["module", "add", "foo", "--description", "Foo daemon", "--log", "/var/log/foo.log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The module 'foo' has been added"));

    agent(temp.path())
        .args(["module", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"foo\""))
        .stdout(predicate::str::contains("Foo daemon"));

    agent(temp.path())
        .args(["module", "remove", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The module 'foo' has been removed"));

    let content = std::fs::read_to_string(temp.path().join("modules.yml")).unwrap();
    assert!(!content.contains("foo"));
}

#[test]
fn test_module_remove_unknown_fails() {
    let temp = TempDir::new().unwrap();

    agent(temp.path())
        .args(["module", "remove", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown module 'ghost'"));
}

#[test]
fn test_explicit_config_must_exist() {
    let temp = TempDir::new().unwrap();

    agent(temp.path())
        .args(["--config", "/nonexistent/agent.toml", "module", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
