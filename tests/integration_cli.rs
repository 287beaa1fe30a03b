//! Binary-level tests
//!
//! Runs the `toolbox` executable inside a scratch home and working directory
//! and checks what lands on stdout, stderr and the exit status.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn toolbox(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_toolbox"))
        .args(args)
        .current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env_remove("RUST_LOG")
        .output()
        .expect("toolbox binary runs")
}

/// Verbose notices stay off stdout so JSON output remains parseable
#[test]
fn test_verbose_json_run_keeps_stdout_clean() {
    let home = TempDir::new().unwrap();
    let output = toolbox(home.path(), &["-v", "run", "Linear Graph", "-f", "json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "curve");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Verbose mode enabled"));
}

/// Bad input is reported on stderr with exit status 2
#[test]
fn test_invalid_input_exit_status() {
    let home = TempDir::new().unwrap();
    let output = toolbox(home.path(), &["run", "Charged Particles", "-r", "0,0,abc"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid input"));
    assert!(stderr.contains("'q'"));
}

/// A malformed fallback config is surfaced, and the run continues on defaults
#[test]
fn test_malformed_fallback_config_is_surfaced() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("toolbox.yml"), "tools: [unterminated").unwrap();

    let output = toolbox(home.path(), &["list"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config from toolbox.yml"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Linear Graph"));
}
