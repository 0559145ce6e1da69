// tests/cli.rs
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn write_trace(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn run_reports_statistics() {
    let trace = write_trace(&["00400100 1 5 -1 -1", "00400104 0 6 5 -1"]);
    Command::cargo_bin("oosim_rust")
        .unwrap()
        .args(["run", "--input"])
        .arg(trace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Scheduler Statistics:"))
        .stdout(predicate::str::contains("Instructions Retired: 2"));
}

#[test]
fn run_emits_json_statistics() {
    let trace = write_trace(&["00400100 1 5 -1 -1"]);
    Command::cargo_bin("oosim_rust")
        .unwrap()
        .args(["run", "--json", "--input"])
        .arg(trace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cycle_count\""))
        .stdout(predicate::str::contains("\"retired_instruction\": 1"));
}

#[test]
fn run_rejects_malformed_trace() {
    let trace = write_trace(&["garbage line"]);
    Command::cargo_bin("oosim_rust")
        .unwrap()
        .args(["run", "--input"])
        .arg(trace.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn run_writes_cycle_log() {
    let trace = write_trace(&["00400100 1 5 -1 -1"]);
    let log = tempfile::NamedTempFile::new().unwrap();
    Command::cargo_bin("oosim_rust")
        .unwrap()
        .args(["run", "--input"])
        .arg(trace.path())
        .args(["--output"])
        .arg(log.path())
        .assert()
        .success();

    let contents = std::fs::read_to_string(log.path()).unwrap();
    assert!(contents.contains("=== Cycle 1 ==="));
    assert!(contents.contains("--- Reservation Station ---"));
    assert!(contents.contains("=== Run Summary ==="));
    assert!(contents.contains("Scheduler Statistics:"));
}

#[test]
fn log_interval_samples_cycles() {
    // A single independent instruction runs for six cycles; an interval
    // of two keeps cycles 1, 3, and 5.
    let trace = write_trace(&["00400100 1 5 -1 -1"]);
    let log = tempfile::NamedTempFile::new().unwrap();
    Command::cargo_bin("oosim_rust")
        .unwrap()
        .args(["run", "--log-interval", "2", "--input"])
        .arg(trace.path())
        .args(["--output"])
        .arg(log.path())
        .assert()
        .success();

    let contents = std::fs::read_to_string(log.path()).unwrap();
    assert!(contents.contains("=== Cycle 1 ==="));
    assert!(contents.contains("=== Cycle 3 ==="));
    assert!(contents.contains("=== Cycle 5 ==="));
    assert!(!contents.contains("=== Cycle 2 ==="));
    assert!(!contents.contains("=== Cycle 4 ==="));
    assert!(contents.contains("=== Run Summary ==="));
}

#[test]
fn generate_writes_requested_count() {
    let out = tempfile::NamedTempFile::new().unwrap();
    Command::cargo_bin("oosim_rust")
        .unwrap()
        .args(["generate", "--count", "5", "--seed", "9", "--output"])
        .arg(out.path())
        .assert()
        .success();

    let contents = std::fs::read_to_string(out.path()).unwrap();
    assert_eq!(contents.lines().count(), 5);
}

#[test]
fn generated_trace_runs_end_to_end() {
    let out = tempfile::NamedTempFile::new().unwrap();
    Command::cargo_bin("oosim_rust")
        .unwrap()
        .args(["generate", "--count", "50", "--seed", "3", "--output"])
        .arg(out.path())
        .assert()
        .success();

    Command::cargo_bin("oosim_rust")
        .unwrap()
        .args(["run", "--json", "--input"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"retired_instruction\": 50"));
}
