//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a fac command isolated from the user's environment
pub fn fac() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("fac"));
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("fac-tests-no-config"))
        .env_remove("FAC_FORMAT")
        .env_remove("FAC_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to write a file into a temp directory and return its path
pub fn write_file(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Run `fac compute -f json` with the given extra args and parse the output
pub fn compute_json(args: &[&str]) -> serde_json::Value {
    let output = fac()
        .args(["-f", "json", "compute"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "compute failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}
