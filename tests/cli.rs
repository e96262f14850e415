//! E2E tests for the hireme-report binary

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn report_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("hireme-report"))
}

fn render(args: &[&str]) -> String {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("report.html");

    report_cmd()
        .args([
            "report",
            "--data",
            "tests/data/analytics.json",
            "--start",
            "2024-01-01",
            "--end",
            "2024-02-29",
            "--output",
            output.to_str().unwrap(),
        ])
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("written to"));

    fs::read_to_string(&output).unwrap()
}

#[test]
fn test_help() {
    report_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Printable analytics reports"));
}

#[test]
fn full_report_written_to_file() {
    let html = render(&[]);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("HireMe Business Report - January 1, 2024 - February 29, 2024"));
    assert!(html.contains("LKR 2,500.00"));
    assert!(html.contains("Appointment Status"));
    assert!(html.contains("Cleaning &lt;Deep&gt;"));
    assert!(!html.contains("Cleaning <Deep>"));
    assert!(html.contains("window.print()"));
}

#[test]
fn config_file_and_flags() {
    let html = render(&[
        "--config",
        "tests/data/config.json",
        "--company-name",
        "Flag Co",
        "--hide",
        "print-buttons",
    ]);
    assert!(html.contains("#10b981"));
    assert!(html.contains("size: Letter"));
    assert!(html.contains("Flag Co"));
    assert!(!html.contains("Acme Services"));
    assert!(!html.contains("Service Performance</h2>"));
    assert!(html.contains(r#"class="charts-grid""#));
    assert!(!html.contains("window.print()"));
}

#[test]
fn unknown_quick_type_falls_back_to_summary() {
    let bogus = render(&["--kind", "quick", "--quick-type", "bogus"]);
    assert!(bogus.contains("Summary Report"));
    assert!(!bogus.contains("Income Analysis"));
}

#[test]
fn charts_report() {
    let html = render(&["--kind", "charts"]);
    assert!(html.contains("Charts Report"));
    assert_eq!(html.matches(r#"class="chart-card""#).count(), 4);
}

#[test]
fn inverted_period_is_rejected() {
    report_cmd()
        .args([
            "report",
            "--data",
            "tests/data/analytics.json",
            "--start",
            "2024-03-01",
            "--end",
            "2024-01-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid reporting period"));
}

#[test]
fn missing_data_file() {
    report_cmd()
        .args([
            "report",
            "--data",
            "tests/data/missing.json",
            "--start",
            "2024-01-01",
            "--end",
            "2024-01-31",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open analytics file"));
}

#[test]
fn report_from_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("stdin.html");
    let payload = r#"{"income_chart": {"labels": ["Mar"], "data": ["1,250.5"]}}"#;

    assert_cmd::Command::from_std(report_cmd())
        .args([
            "report",
            "--data",
            "-",
            "--start",
            "2024-03-01",
            "--end",
            "2024-03-31",
            "--output",
            output.to_str().unwrap(),
        ])
        .write_stdin(payload)
        .assert()
        .success();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("LKR 1,250.50"));
}

#[test]
fn dashboard_tables() {
    report_cmd()
        .args(["dashboard", "--data", "tests/data/analytics.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Income"))
        .stdout(predicate::str::contains("LKR 2,500.00"))
        .stdout(predicate::str::contains("Plumbing"));
}

#[test]
fn dashboard_csv() {
    report_cmd()
        .args(["dashboard", "--data", "tests/data/analytics.json", "--csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("series,label,value"))
        .stdout(predicate::str::contains("Income,Feb,1500"));
}

#[test]
fn locate_exact_city() {
    report_cmd()
        .args(["locate", "--lat", "7.2906", "--lng", "80.6337"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kandy (0.00 km)"));
}

#[test]
fn locate_out_of_range() {
    report_cmd()
        .args(["locate", "--lat", "-91", "--lng", "80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn schema_outputs() {
    report_cmd()
        .args(["schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("income_chart"));

    report_cmd()
        .args(["schema", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("primaryColor"));
}
