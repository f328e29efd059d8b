//! CLI and basic command tests

mod common;

use common::{compute_json, fac, write_file};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    fac()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fibre angle"));
}

#[test]
fn test_version_displays() {
    fac()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fac"));
}

#[test]
fn test_unknown_command_fails() {
    fac()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_generate() {
    fac()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_fac"));
}

// ============================================================================
// Compute Tests
// ============================================================================

#[test]
fn test_compute_defaults_summary() {
    let output = fac().args(["-f", "table", "compute"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    insta::assert_snapshot!(
        stdout.trim_end(),
        @"To achieve 45° at 100 RPM, use a mandrel velocity of approximately 11.06 mm/s"
    );
}

#[test]
fn test_compute_text_report() {
    fac()
        .args(["compute", "--no-chart"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of Horn Gears: 192"))
        .stdout(predicate::str::contains("sample 23 of 200"))
        .stdout(predicate::str::contains("exact solution 10.91 mm/s"))
        .stdout(predicate::str::contains(
            "To achieve 45° at 100 RPM, use a mandrel velocity of approximately 11.06 mm/s",
        ));
}

#[test]
fn test_compute_text_report_with_chart() {
    fac()
        .arg("compute")
        .assert()
        .success()
        .stdout(predicate::str::contains("mm/s"))
        .stdout(predicate::str::contains("90°"));
}

#[test]
fn test_compute_json_defaults() {
    let json = compute_json(&[]);
    assert_eq!(json["parameters"]["gearCount"], 192.0);
    assert_eq!(json["parameters"]["targetAngle"], 45.0);
    assert_eq!(json["intersection"]["index"], 22);
    assert_eq!(json["sweep"].as_array().unwrap().len(), 200);
    assert_eq!(json["curve"][0], 90.0);
    assert_eq!(json["sweep"][199], 100.0);
}

#[test]
fn test_compute_low_target_angle() {
    let json = compute_json(&["--angle", "10"]);
    assert_eq!(json["intersection"]["index"], 123);
    let velocity = json["intersection"]["velocity"].as_f64().unwrap();
    assert!((velocity - 61.809).abs() < 1e-3);
}

#[test]
fn test_compute_saturates_at_sweep_end() {
    let json = compute_json(&["-n", "192", "-d", "1000", "-s", "150", "-a", "10"]);
    assert_eq!(json["intersection"]["index"], 199);
    assert_eq!(json["intersection"]["velocity"], 100.0);
}

#[test]
fn test_compute_saturates_at_sweep_start() {
    let json = compute_json(&["-n", "192", "-d", "1", "-s", "25", "-a", "80"]);
    assert_eq!(json["intersection"]["index"], 0);
    assert_eq!(json["intersection"]["angle"], 90.0);
}

#[test]
fn test_compute_clamps_and_defaults_entries() {
    let json = compute_json(&["-n", "abc", "-d", "5000", "-s", "-3", "-a", "95"]);
    assert_eq!(json["parameters"]["gearCount"], 192.0);
    assert_eq!(json["parameters"]["mandrelDiameter"], 1000.0);
    assert_eq!(json["parameters"]["hornGearSpeed"], 25.0);
    assert_eq!(json["parameters"]["targetAngle"], 80.0);
}

#[test]
fn test_compute_empty_entry_uses_default() {
    let json = compute_json(&["--speed", ""]);
    assert_eq!(json["parameters"]["hornGearSpeed"], 100.0);
}

#[test]
fn test_compute_yaml_output() {
    fac()
        .args(["-f", "yaml", "compute"])
        .assert()
        .success()
        .stdout(predicate::str::contains("targetAngle: 45"))
        .stdout(predicate::str::contains("summary:"));
}

#[test]
fn test_verbose_logs_clamping_to_stderr() {
    fac()
        .args(["-v", "-f", "table", "compute", "-n", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("To achieve 45°"))
        .stderr(predicate::str::contains("value clamped to bounds"));
}

// ============================================================================
// Parameter File Tests
// ============================================================================

#[test]
fn test_params_file_is_used() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "params.yaml", "targetAngle: 10\nhornGearSpeed: \"100\"\n");

    let json = compute_json(&["--params", path.to_str().unwrap()]);
    assert_eq!(json["parameters"]["targetAngle"], 10.0);
    assert_eq!(json["intersection"]["index"], 123);
}

#[test]
fn test_flags_override_params_file() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "params.yaml", "targetAngle: 10\n");

    let json = compute_json(&["--params", path.to_str().unwrap(), "--angle", "45"]);
    assert_eq!(json["parameters"]["targetAngle"], 45.0);
}

#[test]
fn test_params_file_invalid_yaml_fails() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "params.yaml", "gearCount: [1, 2\n");

    fac()
        .args(["compute", "--params", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid YAML"));
}

#[test]
fn test_params_file_unknown_key_fails() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "params.yaml", "pitch: 4\n");

    fac()
        .args(["compute", "--params", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pitch"));
}

// ============================================================================
// Sweep and Bounds Tests
// ============================================================================

#[test]
fn test_sweep_csv_lists_every_sample() {
    let output = fac().args(["-f", "csv", "sweep"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "index,velocity,angle,intersection");
    assert_eq!(lines.len(), 201);
    assert_eq!(lines.iter().filter(|l| l.ends_with(",true")).count(), 1);
    assert!(lines[23].starts_with("22,"));
}

#[test]
fn test_sweep_table_with_stride() {
    fac()
        .args(["sweep", "--every", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VELOCITY (mm/s)"))
        .stdout(predicate::str::contains("5 of 200 sample(s) shown"));
}

#[test]
fn test_sweep_rejects_zero_stride() {
    fac()
        .args(["sweep", "--every", "0"])
        .assert()
        .failure();
}

#[test]
fn test_bounds_table() {
    fac()
        .arg("bounds")
        .assert()
        .success()
        .stdout(predicate::str::contains("hornGearSpeed"))
        .stdout(predicate::str::contains("--diameter"));
}

#[test]
fn test_bounds_csv() {
    fac()
        .args(["-f", "csv", "bounds"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parameter,flag,min,max,default,unit"))
        .stdout(predicate::str::contains("hornGearSpeed,speed,25"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_file_sets_default_format() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "config.yaml", "format: json\n");

    let output = fac()
        .args(["--config", path.to_str().unwrap(), "compute"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["intersection"]["index"], 22);
}

#[test]
fn test_format_flag_beats_config_file() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "config.yaml", "format: json\n");

    fac()
        .args(["--config", path.to_str().unwrap(), "-f", "table", "compute"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("To achieve 45°"));
}

#[test]
fn test_config_from_env_var() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "config.yaml", "format: yaml\n");

    fac()
        .env("FAC_CONFIG", &path)
        .arg("bounds")
        .assert()
        .success()
        .stdout(predicate::str::contains("parameter: gearCount"));
}

#[test]
fn test_missing_config_file_fails() {
    fac()
        .args(["--config", "/nonexistent/fac/config.yaml", "compute"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_invalid_config_file_fails() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "config.yaml", "colour: false\n");

    fac()
        .args(["--config", path.to_str().unwrap(), "compute"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config file"));
}
