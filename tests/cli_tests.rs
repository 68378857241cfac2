//! Integration tests for the CLI application
//!
//! These tests run the compiled binary against a scratch project root.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hiring-svm"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("Failed to run CLI")
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{what} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_cli_generate_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run(temp_dir.path(), &["generate", "-n", "50", "--seed", "7"]);
    assert_success(&output, "generate");

    let csv_path = temp_dir.path().join("data").join("candidate_data.csv");
    let text = std::fs::read_to_string(&csv_path).expect("dataset written");
    assert_eq!(text.lines().count(), 51);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Candidates: 50"));
}

#[test]
fn test_cli_generate_zero_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run(temp_dir.path(), &["generate", "-n", "0"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_train_predict_info() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let output = run(
        temp_dir.path(),
        &["train", "-n", "120", "-k", "linear", "-k", "poly"],
    );
    assert_success(&output, "train");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("linear"));
    assert!(stdout.contains("polynomial"));
    assert!(!stdout.contains("sigmoid"));
    assert!(temp_dir.path().join("data").join("best_model.json").exists());
    assert!(temp_dir
        .path()
        .join("results")
        .join("linear_report.json")
        .exists());

    let output = run(
        temp_dir.path(),
        &["predict", "--experience-years", "3.5", "--technical-score", "75"],
    );
    assert_success(&output, "predict");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hired") || stdout.contains("Rejected"));
    assert!(stdout.contains("Confidence"));

    let output = run(temp_dir.path(), &["info"]);
    assert_success(&output, "info");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Support Vectors"));

    let output = run(
        temp_dir.path(),
        &["predict", "--experience-years", "11", "--technical-score", "75"],
    );
    assert!(!output.status.success(), "out of range input must fail");
}

#[test]
fn test_cli_predict_without_model() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = run(
        temp_dir.path(),
        &["predict", "--experience-years", "1", "--technical-score", "40"],
    );
    assert!(!output.status.success());
}

#[test]
fn test_cli_help_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_hiring-svm"))
        .arg("--help")
        .output()
        .expect("Failed to run CLI");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["generate", "train", "predict", "info", "serve"] {
        assert!(stdout.contains(command), "help is missing {command}");
    }
}

#[test]
fn test_cli_version_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_hiring-svm"))
        .arg("--version")
        .output()
        .expect("Failed to run CLI");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
