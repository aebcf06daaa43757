//! Integration tests for `puro create-project`
//!
//! Runs the built binary with HOME pointed at a temporary directory so no
//! user configuration leaks in, and with PURO_ARCHIVE_URL aimed at a mock
//! archive source.

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tar::{Builder, EntryType, Header};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ─── Helpers ───────────────────────────────────────────────────────────────

fn template_archive() -> Vec<u8> {
    let mut builder = Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

    for (name, contents) in [
        ("app-master/package.json", "{ \"name\": \"app\" }\n"),
        ("app-master/src/main.ts", "console.log('hello');\n"),
    ] {
        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Regular);
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, name, contents.as_bytes())
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}

async fn archive_server(template: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{}/archive/master.tar.gz", template)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(template_archive()))
        .mount(&server)
        .await;
    server
}

/// Every variable the config loader reads
const PURO_ENV_VARS: &[&str] = &[
    "PURO_DEFAULT_TEMPLATE",
    "PURO_ARCHIVE_URL",
    "PURO_USER_AGENT",
    "PURO_PACKAGE_MANAGER",
    "PURO_SKIP_INSTALL",
    "PURO_INSTALL_EXIT_STATUS",
];

fn puro(home: &Path, archive_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("puro").unwrap();
    for var in PURO_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home).env("PURO_ARCHIVE_URL", archive_url);
    cmd
}

// ─── Tests ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_create_project() {
    Command::cargo_bin("puro")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create-project"));
}

#[test]
fn test_missing_target_exits_with_1() {
    let home = TempDir::new().unwrap();
    let parent = TempDir::new().unwrap();
    let missing = parent.path().join("nope");

    puro(home.path(), "http://127.0.0.1:9/{template}/archive/{branch}.tar.gz")
        .args(["create-project", missing.to_str().unwrap(), "--skip-install"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Target directory does not exist"));

    assert!(!missing.exists());
    assert_eq!(fs::read_dir(parent.path()).unwrap().count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_project_scaffolds_directory() {
    let server = archive_server("owner/repo").await;
    let home = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let pattern = format!("{}/{{template}}/archive/{{branch}}.tar.gz", server.uri());

    puro(home.path(), &pattern)
        .args([
            "create-project",
            target.path().to_str().unwrap(),
            "-t",
            "owner/repo",
            "--skip-install",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project created"));

    assert!(target.path().join(".puro/template.tar.gz").is_file());
    assert!(target.path().join("package.json").is_file());
    assert!(target.path().join("src/main.ts").is_file());
    assert!(!target.path().join("app-master").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_package_manager_exits_with_1() {
    let server = archive_server("owner/repo").await;
    let home = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let pattern = format!("{}/{{template}}/archive/{{branch}}.tar.gz", server.uri());

    puro(home.path(), &pattern)
        .args([
            "create-project",
            target.path().to_str().unwrap(),
            "--template",
            "owner/repo",
            "--package-manager",
            "puro-no-such-package-manager",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Package manager not found"));

    assert!(target.path().join("package.json").is_file());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_failure_exits_with_1() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let pattern = format!("{}/{{template}}/archive/{{branch}}.tar.gz", server.uri());

    puro(home.path(), &pattern)
        .args(["create-project", target.path().to_str().unwrap(), "--skip-install"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP 404"));
}
