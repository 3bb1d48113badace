//! CLI behavior tests: usage, exit codes, report generation.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cgreport_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cgreport"))
}

/// Minimal valid inputs inside one temp dir.
fn inputs(dir: &TempDir) -> (String, String, String) {
    let results = dir.path().join("results.txt");
    fs::write(&results, "T1 S\nT2 U\n").unwrap();

    let log = dir.path().join("run.log");
    fs::write(&log, "performing test case: T1\nall good\n").unwrap();

    let md = dir.path().join("suites");
    fs::create_dir(&md).unwrap();
    fs::write(md.join("suite.md"), "## T1\nFirst test.\n").unwrap();

    (
        results.display().to_string(),
        log.display().to_string(),
        md.display().to_string(),
    )
}

#[test]
fn too_few_arguments_prints_usage() {
    let mut cmd = cgreport_cmd();
    cmd.arg("only-one");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_results_file_exit_2_no_output() {
    let dir = TempDir::new().unwrap();
    let (_, log, md) = inputs(&dir);
    let out = dir.path().join("report.html");

    let mut cmd = cgreport_cmd();
    cmd.arg("nonexistent.txt").arg(log).arg(md).arg(&out);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("not found"));
    assert!(!out.exists(), "no partial report on failure");
}

#[test]
fn markdown_path_must_be_a_directory() {
    let dir = TempDir::new().unwrap();
    let (results, log, _) = inputs(&dir);

    let mut cmd = cgreport_cmd();
    cmd.arg(results.clone()).arg(log).arg(results);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn malformed_status_code_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let (results, log, md) = inputs(&dir);
    fs::write(&results, "T1 S\nT2 X\n").unwrap();

    let mut cmd = cgreport_cmd();
    cmd.arg(results).arg(log).arg(md);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("status code 'X'"));
}

#[test]
fn generates_report_at_given_path() {
    let dir = TempDir::new().unwrap();
    let (results, log, md) = inputs(&dir);
    let out = dir.path().join("report.html");

    let mut cmd = cgreport_cmd();
    cmd.arg(results).arg(log).arg(md).arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("HTML report generated"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Native Image Test Results"));
    assert!(html.contains("T1"));
}

#[test]
fn quiet_mode_suppresses_the_summary() {
    let dir = TempDir::new().unwrap();
    let (results, log, md) = inputs(&dir);
    let out = dir.path().join("report.html");

    let mut cmd = cgreport_cmd();
    cmd.arg(results).arg(log).arg(md).arg(&out).arg("--quiet");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("summary").not())
        .stdout(predicate::str::contains("HTML report generated").not());
    assert!(out.exists());
}

#[test]
fn json_flag_prints_valid_records() {
    let dir = TempDir::new().unwrap();
    let (results, log, md) = inputs(&dir);
    let out = dir.path().join("report.html");

    let mut cmd = cgreport_cmd();
    cmd.arg(results).arg(log).arg(md).arg(&out).arg("--json").arg("--quiet");
    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let s = String::from_utf8_lossy(&output.stdout);
    let v: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert_eq!(v["total"], 2);
    assert_eq!(v["tests"][0]["name"], "T1");
    assert_eq!(v["tests"][1]["status"], "FAILED");
}
