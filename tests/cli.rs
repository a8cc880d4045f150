//! Integration tests for top-level CLI behavior.

use std::process::Command;

fn run_gistlock(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_gistlock");
    Command::new(bin)
        .args(args)
        .env_remove("GISTLOCK_RECORD")
        .output()
        .expect("failed to run gistlock binary")
}

#[test]
fn missing_arguments_print_usage_and_fail() {
    let output = run_gistlock(&[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Usage"));
    assert!(stderr.contains("GITHUB_TOKEN"));
}

#[test]
fn two_of_three_arguments_still_fail() {
    let output = run_gistlock(&["ghp_token", "gist-id"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("LOOTLABS_TOKEN"));
}

#[test]
fn help_lists_positionals_and_output_dir() {
    let output = run_gistlock(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("GIST_ID"));
    assert!(stdout.contains("--output-dir"));
}

#[test]
fn invalid_override_fails_before_any_request() {
    let output = Command::new(env!("CARGO_BIN_EXE_gistlock"))
        .args(["ghp_token", "gist-id", "ll_token"])
        .env("GISTLOCK_TIER_ID", "gold")
        .env_remove("GISTLOCK_RECORD")
        .output()
        .expect("failed to run gistlock binary");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("GISTLOCK_TIER_ID"));
}
