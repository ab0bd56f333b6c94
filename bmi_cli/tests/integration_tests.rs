//! Integration tests for the bmi binary.
//!
//! These tests verify end-to-end behavior including:
//! - Calculation output and history recording
//! - Input validation without side effects
//! - History listing, charting and CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bmi"))
}

fn calc(data_dir: &std::path::Path, weight: &str, height: &str) -> assert_cmd::assert::Assert {
    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--weight")
        .arg(weight)
        .arg("--height")
        .arg(height)
        .assert()
}

fn read_history(data_dir: &std::path::Path) -> Vec<serde_json::Value> {
    let content =
        fs::read_to_string(data_dir.join("bmi_data.json")).expect("Failed to read history");
    serde_json::from_str(&content).expect("History is not a JSON array")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Body Mass Index calculator with history tracking",
        ));
}

#[test]
fn test_calc_prints_assessment() {
    let temp_dir = setup_test_dir();

    calc(temp_dir.path(), "70", "1.75")
        .success()
        .stdout(predicate::str::contains("BMI: 22.86"))
        .stdout(predicate::str::contains("Category: Normal"))
        .stdout(predicate::str::contains("Maintain your current weight!"))
        .stdout(predicate::str::contains("Reading saved"));
}

#[test]
fn test_calc_records_reading() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    calc(data_dir, "45", "1.7")
        .success()
        .stdout(predicate::str::contains("Category: Underweight"))
        .stdout(predicate::str::contains("gain at least"));

    let history = read_history(data_dir);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["bmi"], 15.57);

    let date = history[0]["date"].as_str().unwrap();
    assert!(
        chrono::NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").is_ok(),
        "unexpected date layout: {}",
        date
    );
}

#[test]
fn test_each_calculation_appends_one_reading() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for (weight, height) in [("70", "1.75"), ("50", "1.6"), ("95", "1.8")] {
        calc(data_dir, weight, height).success();
    }

    let bmis: Vec<f64> = read_history(data_dir)
        .iter()
        .map(|r| r["bmi"].as_f64().unwrap())
        .collect();
    assert_eq!(bmis, vec![22.86, 19.53, 29.32]);
}

#[test]
fn test_invalid_weight_is_rejected_without_recording() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    calc(data_dir, "abc", "1.75")
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Please enter valid positive numbers"));

    assert!(!data_dir.join("bmi_data.json").exists());
}

#[test]
fn test_non_positive_height_is_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    calc(data_dir, "70", "0")
        .failure()
        .stderr(predicate::str::contains("height must be greater than zero"));

    calc(data_dir, "-70", "1.8").failure();

    assert!(!data_dir.join("bmi_data.json").exists());
}

#[test]
fn test_dry_run_does_not_record() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--weight")
        .arg("70")
        .arg("--height")
        .arg("1.75")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!data_dir.join("bmi_data.json").exists());
}

#[test]
fn test_calc_prompts_for_missing_values() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(data_dir)
        .write_stdin("50\n1.6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weight (kg):"))
        .stdout(predicate::str::contains("BMI: 19.53"));

    assert_eq!(read_history(data_dir).len(), 1);
}

#[test]
fn test_history_without_data() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No BMI data found."));
}

#[test]
fn test_history_lists_readings_with_category() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    calc(data_dir, "70", "1.75").success();
    calc(data_dir, "110", "1.8").success();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("22.86  Normal"))
        .stdout(predicate::str::contains("33.95  Obese"))
        .stdout(predicate::str::contains("2 readings"));
}

#[test]
fn test_chart_plots_readings() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    calc(data_dir, "70", "1.75").success();
    calc(data_dir, "75", "1.75").success();

    cli()
        .arg("chart")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI History Over Time"))
        .stdout(predicate::str::contains("1. "))
        .stdout(predicate::str::contains("24.49"));
}

#[test]
fn test_chart_without_data() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("chart")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No BMI data found."));
}

#[test]
fn test_chart_rejects_size_below_minimum() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    calc(data_dir, "70", "1.75").success();

    cli()
        .args(["chart", "--width", "0", "--data-dir"])
        .arg(data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--width"));

    cli()
        .args(["chart", "--height", "3", "--data-dir"])
        .arg(data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--height"));

    cli()
        .args(["chart", "--width", "30", "--height", "6", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI History Over Time"));
}

#[test]
fn test_export_writes_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let csv_path = data_dir.join("export.csv");

    calc(data_dir, "70", "1.75").success();

    cli()
        .arg("export")
        .arg(&csv_path)
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 readings"));

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("date,bmi,category\n"));
    assert!(csv.contains(",22.86,Normal"));
}

#[test]
fn test_obese_threshold_from_config() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let config_path = data_dir.join("config.toml");
    fs::write(&config_path, "[guidance]\nloss_threshold = \"obese\"\n").unwrap();

    cli()
        .arg("calc")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--config")
        .arg(&config_path)
        .arg("--weight")
        .arg("90")
        .arg("--height")
        .arg("1.8")
        .assert()
        .success()
        .stdout(predicate::str::contains("Category: Overweight"))
        .stdout(predicate::str::contains("Keep your weight at or below"));
}
