use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

const NO_MATCH: &str = "No suitable game found matching your criteria.";

fn sample_csv() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_library.csv")
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gamebutler"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_missing_library_exits_with_failure() {
    let output = run(&["--csv", "definitely/not/here.csv"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error loading library"));
}

#[test]
fn test_malformed_library_exits_with_failure() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Title,Genre").unwrap();
    writeln!(file, "Portal,Puzzle").unwrap();

    let output = run(&["--csv", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("AppID"));
}

#[test]
fn test_no_match_prints_message_and_succeeds() {
    let csv = sample_csv();
    let output = run(&["--csv", csv.to_str().unwrap(), "--genre", "Racing"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(NO_MATCH));
}

#[test]
fn test_recommendation_is_printed() {
    let csv = sample_csv();
    let output = run(&["--csv", csv.to_str().unwrap(), "--genre", "platformer"]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("GameButler Recommends:"));
    assert!(out.contains("Title:    Celeste"));
}

#[test]
fn test_list_prints_every_match() {
    let csv = sample_csv();
    let output = run(&["--csv", csv.to_str().unwrap(), "--genre", "RPG", "--list"]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("The Witcher 3: Wild Hunt"));
    assert!(out.contains("Undertale"));
    assert!(!out.contains("Portal 2"));
    assert_eq!(out.lines().filter(|l| !l.trim().is_empty()).count(), 2);
}

#[test]
fn test_list_with_no_match_succeeds() {
    let csv = sample_csv();
    let output = run(&["--csv", csv.to_str().unwrap(), "--tag", "Racing", "--list"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(NO_MATCH));
}
