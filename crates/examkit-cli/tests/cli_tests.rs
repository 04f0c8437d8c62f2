//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const QUESTIONS: &str = "\
What is the capital of France?
Berlin
Paris
Madrid
Rome

Which planet is known as the red planet?
Venus
Mars
Jupiter
Saturn
";

const ROSTER: &str = "\
Name,Email,Roll No,Marks
Ann,a@x.com,R1,
Bob,b@x.com,R2,
";

/// An isolated working directory with no config files in reach.
fn examkit(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("examkit").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("EXAMKIT_QUESTION_FILE")
        .env_remove("EXAMKIT_KEY_FILE")
        .env_remove("EXAMKIT_ROSTER_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn exam_dir(key: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("que_and_options.txt"), QUESTIONS).unwrap();
    std::fs::write(dir.path().join("key.txt"), key).unwrap();
    std::fs::write(dir.path().join("roster.csv"), ROSTER).unwrap();
    dir
}

#[test]
fn run_scores_and_updates_roster() {
    let dir = exam_dir("2\n\n");

    examkit(dir.path())
        .args(["run", "--roster", "roster.csv"])
        .write_stdin("Ann\na@x.com\nR1\n2\nn\n3\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1: What is the capital of France?"))
        .stdout(predicate::str::contains("Question 2: Which planet"))
        .stdout(predicate::str::contains("Your marks: 1"));

    let roster = std::fs::read_to_string(dir.path().join("roster.csv")).unwrap();
    assert!(roster.contains("Ann,a@x.com,R1,1"));
    assert!(roster.contains("Bob,b@x.com,R2,\n"));
}

#[test]
fn run_rejects_mismatched_roll_number_then_admits() {
    let dir = exam_dir("2\n2\n");

    examkit(dir.path())
        .args(["run", "--roster", "roster.csv"])
        .write_stdin("Bob\nb@x.com\nR1\nBob\nb@x.com\nR2\n2\nn\n2\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Email and roll number do not match."))
        .stdout(predicate::str::contains("Your marks: 2"));
}

#[test]
fn run_with_missing_key_file_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("que_and_options.txt"), QUESTIONS).unwrap();

    examkit(dir.path())
        .args(["run", "--roster", "roster.csv"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Files not found"));
}

#[test]
fn run_without_roster_rejects_everyone() {
    let dir = exam_dir("2\n2\n");

    examkit(dir.path())
        .args(["run", "--roster", "missing.csv"])
        .write_stdin("Ann\na@x.com\nR1\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Email and roll number do not match."))
        .stderr(predicate::str::contains("login aborted"));
}

#[test]
fn run_writes_json_report() {
    let dir = exam_dir("2\n2\n");

    examkit(dir.path())
        .args(["run", "--roster", "roster.csv", "--report", "out/report.json"])
        .write_stdin("Ann\na@x.com\nR1\n2\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your marks: 1"))
        .stderr(predicate::str::contains("Report saved to"));

    let raw = std::fs::read_to_string(dir.path().join("out/report.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(report["outcome"]["status"], "scored");
    assert_eq!(report["outcome"]["score"], 1);
    assert_eq!(report["participant"]["email"], "a@x.com");
    assert_eq!(report["selections"], serde_json::json!([2, null]));
}

#[test]
fn run_uses_config_file() {
    let dir = exam_dir("2\n2\n");
    std::fs::create_dir(dir.path().join("people")).unwrap();
    std::fs::rename(
        dir.path().join("roster.csv"),
        dir.path().join("people/students.csv"),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("examkit.toml"),
        "roster_file = \"people/students.csv\"\n",
    )
    .unwrap();

    examkit(dir.path())
        .arg("run")
        .write_stdin("Ann\na@x.com\nR1\n2\nn\n2\ns\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your marks: 2"));

    let roster = std::fs::read_to_string(dir.path().join("people/students.csv")).unwrap();
    assert!(roster.contains("Ann,a@x.com,R1,2"));
}

#[test]
fn validate_clean_bank() {
    let dir = exam_dir("2\n2\n");

    examkit(dir.path())
        .args(["validate", "--roster", "roster.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Question bank valid."));
}

#[test]
fn validate_reports_key_mismatch() {
    let dir = exam_dir("2\n");

    examkit(dir.path())
        .args(["validate", "--roster", "roster.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("only the first 1 are scored"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_nonexistent_questions() {
    let dir = TempDir::new().unwrap();

    examkit(dir.path())
        .args(["validate", "--questions", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    examkit(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created examkit.toml"))
        .stdout(predicate::str::contains("Created que_and_options.txt"));

    assert!(dir.path().join("examkit.toml").exists());
    assert!(dir.path().join("key.txt").exists());
    assert!(dir.path().join("assets/roster.csv").exists());

    // The starter files form a valid exam
    examkit(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question bank valid."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    examkit(dir.path()).arg("init").assert().success();

    examkit(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
