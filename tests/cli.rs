use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MANIFEST: &str = r#"
title = "Лабораторна 1"
sources = ["Документація Rust"]

[[blocks]]
type = "section"
text = "Хід роботи"

[[blocks]]
type = "text"
text = "Налаштовано середовище"

[[blocks]]
type = "source_list"
"#;

/// Binary with config lookups pointed at an empty home
fn cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lab-report").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn render_to_explicit_output() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("lab1.toml");
    fs::write(&manifest, MANIFEST).unwrap();
    let output = tmp.path().join("out.md");

    cmd(tmp.path())
        .arg("render")
        .arg(&manifest)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("out.md"));

    let markdown = fs::read_to_string(&output).unwrap();
    assert!(markdown.contains("# 1 Хід роботи"));
    assert!(markdown.contains("Налаштовано середовище."));
    assert!(markdown.contains("1. Документація Rust"));
}

#[test]
fn render_defaults_to_title_next_to_manifest() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("lab1.toml");
    fs::write(&manifest, MANIFEST).unwrap();

    cmd(tmp.path()).arg("render").arg(&manifest).assert().success();

    assert!(tmp.path().join("Лабораторна 1.md").exists());
}

#[test]
fn render_json_manifest_with_config() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("lab2.json");
    fs::write(
        &manifest,
        r#"{"blocks": [{"type": "section", "text": "Практика"}]}"#,
    )
    .unwrap();
    let config = tmp.path().join("config.toml");
    fs::write(&config, "first_section = 4\n").unwrap();

    cmd(tmp.path())
        .arg("render")
        .arg(&manifest)
        .arg("-c")
        .arg(&config)
        .assert()
        .success();

    let markdown = fs::read_to_string(tmp.path().join("lab2.md")).unwrap();
    assert!(markdown.contains("# 4 Практика"));
}

#[test]
fn render_missing_manifest_fails() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .args(["render", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(contains("Failed to load manifest"));
}

#[test]
fn render_unsupported_format_fails() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("lab.yaml");
    fs::write(&manifest, "blocks: []").unwrap();

    cmd(tmp.path())
        .arg("render")
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(contains("Unsupported manifest format"));
}

#[test]
fn render_missing_explicit_config_fails() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("lab1.toml");
    fs::write(&manifest, MANIFEST).unwrap();

    cmd(tmp.path())
        .arg("render")
        .arg(&manifest)
        .args(["-c", "nope.toml"])
        .assert()
        .failure()
        .stderr(contains("Config file not found"));
}

#[test]
fn config_path_prints_location() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .arg("config-path")
        .assert()
        .success()
        .stdout(contains("config.toml"));
}
