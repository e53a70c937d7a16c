//! CLI integration tests for the offline commands.

use assert_cmd::Command;
use predicates::prelude::*;

fn docugen() -> Command {
    let mut cmd = Command::cargo_bin("docugen").unwrap();
    cmd.env_remove("DOCUGEN_API_KEY");
    cmd
}

#[test]
fn help_lists_subcommands() {
    docugen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("document"))
        .stdout(predicate::str::contains("flowchart"))
        .stdout(predicate::str::contains("wireframe"))
        .stdout(predicate::str::contains("render"));
}

#[test]
fn render_produces_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.md");
    std::fs::write(
        &input,
        "# Render Test\n\nA paragraph.\n\n- one\n- two\n\n| A | B |\n| --- | --- |\n| 1 | 2 |\n",
    )
    .unwrap();
    let output = dir.path().join("doc.pdf");

    docugen()
        .current_dir(dir.path())
        .args(["render", "doc.md", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 pages"));

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn render_missing_input_exits_with_input_code() {
    let dir = tempfile::tempdir().unwrap();
    docugen()
        .current_dir(dir.path())
        .args(["render", "missing.md"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn render_empty_markdown_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.md");
    std::fs::write(&input, "").unwrap();

    docugen()
        .current_dir(dir.path())
        .args(["render", "empty.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn document_without_api_key_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    docugen()
        .current_dir(dir.path())
        .args([
            "document",
            "--title",
            "Ride Share App",
            "--description",
            "An app for sharing rides.",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn document_rejects_missing_description() {
    docugen()
        .args(["document", "--title", "T"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("description"));
}

#[test]
fn info_reports_configuration() {
    let dir = tempfile::tempdir().unwrap();
    docugen()
        .current_dir(dir.path())
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Endpoint:"))
        .stdout(predicate::str::contains("docugen.toml"));
}

#[test]
fn explicit_config_that_fails_to_parse_exits_with_config_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("broken.toml");
    std::fs::write(&config, "[api\nbroken").unwrap();

    docugen()
        .current_dir(dir.path())
        .args(["--config", "broken.toml", "info"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to load config file"));
}

#[test]
fn explicit_config_that_is_missing_exits_with_config_code() {
    let dir = tempfile::tempdir().unwrap();
    docugen()
        .current_dir(dir.path())
        .args(["--config", "nowhere.toml", "info"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to load config file"));
}

#[test]
fn config_file_branding_reaches_render() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("docugen.toml"),
        "[branding]\nheader = \"Acme Corp\"\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("doc.md"), "# Hello\n\nBody.\n").unwrap();

    docugen()
        .current_dir(dir.path())
        .args(["render", "doc.md", "-o", "out.pdf"])
        .assert()
        .success();
    assert!(dir.path().join("out.pdf").exists());
}
