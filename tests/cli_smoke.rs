#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! Every test points `XDG_CONFIG_HOME` at an empty temp dir so the user's
//! real configuration never leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn langassist(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("langassist").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("LANGASSIST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    langassist(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Streaming language assistant"))
        .stdout(predicate::str::contains("--from"))
        .stdout(predicate::str::contains("--to"))
        .stdout(predicate::str::contains("--endpoint"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    langassist(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_list() {
    let home = TempDir::new().unwrap();
    langassist(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spanish"))
        .stdout(predicate::str::contains("English"))
        .stdout(predicate::str::contains("ja"));
}

#[test]
fn test_providers_list_without_config() {
    let home = TempDir::new().unwrap();
    langassist(&home)
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("No providers configured"));
}

#[test]
fn test_providers_lists_configured_providers() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("langassist");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        r#"
[assist]
provider = "local"

[providers.local]
endpoint = "http://localhost:11434"
models = ["llama3.2"]
"#,
    )
    .unwrap();

    langassist(&home)
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("local"))
        .stdout(predicate::str::contains("(default)"))
        .stdout(predicate::str::contains("llama3.2"));
}

#[test]
fn test_unknown_provider_details_fail() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("langassist");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "[providers.local]\nendpoint = \"http://localhost:11434\"\n",
    )
    .unwrap();

    langassist(&home)
        .args(["providers", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_language_fails() {
    let home = TempDir::new().unwrap();
    langassist(&home)
        .args(["--to", "Klingon", "-e", "http://127.0.0.1:9/api/generate", "topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid language"));
}

#[test]
fn test_empty_topic_from_stdin_shows_notice() {
    let home = TempDir::new().unwrap();
    langassist(&home)
        .args(["-e", "http://127.0.0.1:9/api/generate"])
        .write_stdin("   \n")
        .assert()
        .code(exitcode::DATAERR)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Please enter the topic you need help with.",
        ));
}

#[test]
fn test_empty_topic_without_any_config_shows_notice() {
    let home = TempDir::new().unwrap();
    langassist(&home)
        .write_stdin("   \n")
        .assert()
        .code(exitcode::DATAERR)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Please enter the topic you need help with.",
        ))
        .stderr(predicate::str::contains("provider").not());
}

#[test]
fn test_empty_topic_argument_without_any_config_shows_notice() {
    let home = TempDir::new().unwrap();
    langassist(&home)
        .arg("")
        .assert()
        .code(exitcode::DATAERR)
        .stderr(predicate::str::contains(
            "Please enter the topic you need help with.",
        ));
}

#[test]
fn test_missing_provider_without_endpoint_fails() {
    let home = TempDir::new().unwrap();
    langassist(&home)
        .arg("ser vs estar")
        .assert()
        .failure()
        .stderr(predicate::str::contains("provider"));
}

#[test]
fn test_serve_rejects_invalid_bind() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("langassist");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        concat!(
            "[assist]\nprovider = \"local\"\n\n",
            "[providers.local]\nendpoint = \"http://localhost:11434\"\nmodels = [\"m\"]\n",
        ),
    )
    .unwrap();

    langassist(&home)
        .args(["serve", "--bind", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid bind address"));
}
