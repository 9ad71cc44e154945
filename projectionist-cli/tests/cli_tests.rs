use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src/net")).unwrap();
    fs::create_dir_all(root.join("tests/net")).unwrap();
    fs::write(
        root.join(".projections.json"),
        r#"{
            "src/*.rs": {"alternate": "tests/{}_test.rs", "type": "source"},
            "tests/*_test.rs": {"alternate": "src/{}.rs", "type": "test"}
        }"#,
    )
    .unwrap();
    fs::write(root.join("src/net/codec.rs"), "").unwrap();
    fs::write(root.join("tests/net/codec_test.rs"), "").unwrap();
    temp
}

fn projectionist(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("projectionist").unwrap();
    cmd.current_dir(cwd).env_remove("PROJECTIONIST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    projectionist(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scalar"))
        .stdout(predicate::str::contains("detect"));
}

#[test]
fn test_file_with_relative_path() {
    let temp = project();
    projectionist(temp.path())
        .args(["file", "alternate", "src/net/codec.rs"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("/tests/net/codec_test.rs\n"));
}

#[test]
fn test_scalar_json() {
    let temp = project();
    let output = projectionist(temp.path())
        .args([
            "--format",
            "json",
            "scalar",
            "type",
            "tests/net/codec_test.rs",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let parsed: Vec<String> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed, vec!["test"]);
}

#[test]
fn test_raw_prints_unexpanded_templates() {
    let temp = project();
    projectionist(temp.path())
        .args(["raw", "alternate", "src/net/codec.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tests/{}_test.rs"));
}

#[test]
fn test_rec_walks_back_to_the_start() {
    let temp = project();
    let output = projectionist(temp.path())
        .args(["rec", "alternate", "src/net/codec.rs", "--max-depth", "5"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("tests/net/codec_test.rs"));
    assert!(lines[1].ends_with("src/net/codec.rs"));
}

#[test]
fn test_detect_lists_registry() {
    let temp = project();
    projectionist(temp.path())
        .args(["detect", "src/net"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".projections.json"));
}

#[test]
fn test_missing_file_fails() {
    let temp = project();
    projectionist(temp.path())
        .args(["file", "alternate", "src/missing.rs"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_from_discovers_for_missing_file() {
    let temp = project();
    projectionist(temp.path())
        .args(["file", "alternate", "src/fresh.rs", "--from", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("tests/fresh_test.rs"));
}

#[test]
fn test_malformed_pattern_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".projections.json"),
        r#"{"lib/**.c": {"alternate": "{}.h"}}"#,
    )
    .unwrap();
    fs::write(temp.path().join("a.c"), "").unwrap();
    projectionist(temp.path())
        .args(["file", "alternate", "a.c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed pattern"));
}

#[test]
fn test_transforms_json() {
    let temp = TempDir::new().unwrap();
    let output = projectionist(temp.path())
        .args(["--format", "json", "transforms"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let names: Vec<String> = serde_json::from_str(&stdout).unwrap();
    assert!(names.iter().any(|n| n == "plural"));
    assert!(names.iter().any(|n| n == "snakecase"));
}

#[test]
fn test_quiet_suppresses_logs() {
    let temp = project();
    projectionist(temp.path())
        .args(["--quiet", "scalar", "type", "src/net/codec.rs"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
