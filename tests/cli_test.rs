//! Tests that run the built `grayquant` binary.

mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::*;
use pretty_assertions::assert_eq;

fn grayquant(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grayquant"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run grayquant")
}

#[test]
fn test_no_arguments_uses_fixed_paths() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir.path().join("input.png"), &solid_red_2x2());

    let output = grayquant(dir.path(), &[]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = decode_file(&dir.path().join("input-out.png"));
    assert_eq!(out.palette, vec![[76, 76, 76]]);
    assert_eq!(out.indices, vec![0, 0, 0, 0]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2x2"), "stdout: {stdout}");
}

#[test]
fn test_missing_input_fails_with_stage() {
    let dir = tempfile::tempdir().unwrap();

    let output = grayquant(dir.path(), &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("load"), "stderr: {stderr}");
    assert!(stderr.contains("Input not found"), "stderr: {stderr}");
    assert!(!dir.path().join("input-out.png").exists());
}

#[test]
fn test_json_report() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir.path().join("photo.png"), &rgb_gradient(30, 20));

    let output = grayquant(
        dir.path(),
        &["photo.png", "gray.png", "--colors", "8", "--json"],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["width"], 30);
    assert_eq!(report["height"], 20);
    assert!(report["palette_len"].as_u64().unwrap() <= 8);
    assert_eq!(report["sha256"].as_str().map(str::len), Some(64));

    let written = std::fs::metadata(dir.path().join("gray.png")).unwrap().len();
    assert_eq!(report["bytes_written"].as_u64(), Some(written));
}

#[test]
fn test_colors_out_of_range_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir.path().join("input.png"), &solid_red_2x2());

    for colors in ["1", "257"] {
        let output = grayquant(dir.path(), &["--colors", colors]);
        assert!(!output.status.success(), "--colors {colors} accepted");
    }
    assert!(!dir.path().join("input-out.png").exists());
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(&dir.path().join("input.png"), &solid_red_2x2());

    let output = grayquant(dir.path(), &["--json", "--verbose"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Wrote indexed PNG"), "stderr: {stderr}");
    assert!(serde_json::from_slice::<serde_json::Value>(&output.stdout).is_ok());
}
