//! Runs the `wikidown` binary against a mock site

use crate::support::{mount_children, mount_page, mount_page_status, viewpage_url};
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;
use wiremock::MockServer;

fn write_config_dir(dir: &Path, server: &MockServer) {
    std::fs::write(
        dir.join("config.toml"),
        format!("base-url = \"{}/wiki\"\n", server.uri()),
    )
    .unwrap();
    std::fs::write(
        dir.join(".secrets.toml"),
        "username = \"user@example.com\"\napi-token = \"token123\"\n",
    )
    .unwrap();
}

async fn run_convert(config_dir: &Path, extra: &[&str]) -> Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_wikidown"))
        .arg("convert")
        .arg("--config-dir")
        .arg(config_dir)
        .args(extra)
        .output()
        .await
        .unwrap()
}

/// Root page 42 with one child that answers 403
async fn mount_forbidden_child(server: &MockServer) {
    mount_page(server, "42", "Parent Page", "<h1>Parent</h1>").await;
    mount_children(server, "42", &[("1234", "Child One")]).await;
    mount_page_status(server, "1234", 403).await;
}

#[tokio::test]
async fn test_inaccessible_child_is_logged_and_run_succeeds() {
    let server = MockServer::start().await;
    mount_forbidden_child(&server).await;

    let config_dir = TempDir::new().unwrap();
    write_config_dir(config_dir.path(), &server);
    let out = TempDir::new().unwrap();
    let out_dir = out.path().join("out");

    let output = run_convert(
        config_dir.path(),
        &[
            "--url",
            &viewpage_url(&server, "42"),
            "--output-dir",
            out_dir.to_str().unwrap(),
            "--recursive",
            "--max-depth",
            "2",
        ],
    )
    .await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {}", stderr);

    let index = std::fs::read_to_string(out_dir.join("parent_page").join("index.md")).unwrap();
    assert!(index.starts_with("# Parent"));

    let diagnostics: Vec<&str> = stderr
        .lines()
        .filter(|line| line.contains("Could not access child page 'Child One' (id 1234)"))
        .collect();
    assert_eq!(diagnostics.len(), 1, "stderr: {}", stderr);
    assert!(diagnostics[0].contains("of parent 'Parent Page' (id 42) at depth 2"));

    assert!(stdout.contains("Recursive: true"));
    assert!(stdout.contains("Max Depth: 2"));
    assert!(!stdout.contains("Could not access"));
}

#[tokio::test]
async fn test_strict_run_fails_on_inaccessible_child() {
    let server = MockServer::start().await;
    mount_forbidden_child(&server).await;

    let config_dir = TempDir::new().unwrap();
    write_config_dir(config_dir.path(), &server);
    let out = TempDir::new().unwrap();

    let output = run_convert(
        config_dir.path(),
        &[
            "--url",
            &viewpage_url(&server, "42"),
            "--output-dir",
            out.path().to_str().unwrap(),
            "--recursive",
            "--strict",
        ],
    )
    .await;

    assert!(!output.status.success());
    assert!(out.path().join("parent_page").join("index.md").is_file());
}

#[tokio::test]
async fn test_missing_root_is_fatal() {
    let server = MockServer::start().await;
    mount_page_status(&server, "404", 404).await;

    let config_dir = TempDir::new().unwrap();
    write_config_dir(config_dir.path(), &server);
    let out = TempDir::new().unwrap();

    let output = run_convert(
        config_dir.path(),
        &[
            "--url",
            &viewpage_url(&server, "404"),
            "--output-dir",
            out.path().to_str().unwrap(),
        ],
    )
    .await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Page with id 404 not found."));
}

#[tokio::test]
async fn test_single_file_run_saves_one_document() {
    let server = MockServer::start().await;
    mount_page(&server, "42", "Parent Page", "<h1>Parent</h1>").await;
    mount_page(&server, "7", "Child Page", "<p>child body</p>").await;
    mount_children(&server, "42", &[("7", "Child Page")]).await;
    mount_children(&server, "7", &[]).await;

    let config_dir = TempDir::new().unwrap();
    write_config_dir(config_dir.path(), &server);
    let out = TempDir::new().unwrap();

    let output = run_convert(
        config_dir.path(),
        &[
            "--url",
            &viewpage_url(&server, "42"),
            "--output-dir",
            out.path().to_str().unwrap(),
            "--single-file",
            "--yes",
        ],
    )
    .await;

    assert!(output.status.success());
    let path = out.path().join("parent_page.md");
    assert!(String::from_utf8_lossy(&output.stdout).contains(&format!("Saved: {}", path.display())));

    let content = std::fs::read_to_string(path).unwrap();
    let root = content.find("# Parent Page").unwrap();
    let child = content.find("# Child Page").unwrap();
    assert!(root < child);
    assert!(content[root..child].contains("\n\n---\n\n"));
}
