use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_kestrel_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("kestrel")
}

#[test]
fn test_accounts_lists_configured_pairs() {
    let mut cmd = Command::new(get_kestrel_bin());
    cmd.env_clear()
        .env("USERNAME_ACCOUNT1", "alice@example.com")
        .env("PASSWORD_ACCOUNT1", "hunter2")
        .arg("accounts");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("alice@example.com"))
        .stdout(predicate::str::contains("1"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_accounts_json_never_contains_password() {
    let mut cmd = Command::new(get_kestrel_bin());
    cmd.env_clear()
        .env("USERNAME_ACCOUNT7", "bob@example.com")
        .env("PASSWORD_ACCOUNT7", "hunter2")
        .args(["accounts", "--format", "json"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    let listing: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(listing[0]["account_number"], "7");
    assert_eq!(listing[0]["username"], "bob@example.com");
    assert!(!stdout.contains("hunter2"));
}

#[test]
fn test_accounts_with_nothing_configured() {
    let mut cmd = Command::new(get_kestrel_bin());
    cmd.env_clear().arg("accounts");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No accounts found"));
}

#[test]
fn test_username_without_password_is_not_listed() {
    let mut cmd = Command::new(get_kestrel_bin());
    cmd.env_clear()
        .env("USERNAME_ACCOUNT1", "orphan@example.com")
        .arg("accounts");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("orphan@example.com").not());
}

#[test]
fn test_run_without_accounts_fails() {
    let mut cmd = Command::new(get_kestrel_bin());
    cmd.env_clear().arg("run");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No accounts configured"));
}
