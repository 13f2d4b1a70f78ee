//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

fn run_swear(data_dir: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_swear");
    Command::new(bin)
        .args(args)
        .env("SWEAR_DATA_DIR", data_dir)
        .env_remove("SWEAR_RECORD")
        .env_remove("SWEAR_REPLAY")
        // Unroutable: any accidental network access fails fast.
        .env("SWEAR_MAPPINGS_URL", "http://127.0.0.1:9/exec")
        .output()
        .expect("failed to run swear binary")
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_swear(dir.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for command in ["resolve", "patch", "status", "lookup"] {
        assert!(stdout.contains(command), "missing {command} in help:\n{stdout}");
    }
}

#[test]
fn version_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_swear(dir.path(), &["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "{stdout}");
}

#[test]
fn unknown_subcommand_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_swear(dir.path(), &["frobnicate"]);
    assert!(!output.status.success());
}

#[test]
fn patch_without_module_shows_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_swear(dir.path(), &["patch"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("MODULE"), "{stderr}");
}

#[test]
fn status_with_empty_cache() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_swear(dir.path(), &["status"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("No cached mappings"), "{stdout}");
}

#[test]
fn status_reads_cache_from_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("mappings.txt"), "ABCDEFGHIJK=Player\n").unwrap();
    std::fs::write(dir.path().join("version.txt"), "v12").unwrap();

    let output = run_swear(dir.path(), &["status"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Version v12: 1 mappings"), "{stdout}");
}

#[test]
fn lookup_uses_cache_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("mappings.txt"), "ABCDEFGHIJK=Player\n").unwrap();
    std::fs::write(dir.path().join("version.txt"), "v12").unwrap();

    let output = run_swear(dir.path(), &["lookup", "ABCDEFGHIJK"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("ABCDEFGHIJK = Player"), "{stdout}");
}

#[test]
fn lookup_of_non_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_swear(dir.path(), &["lookup", "Player"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("not an obfuscated name"), "{stdout}");
}

#[test]
fn malformed_cache_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("mappings.txt"), "no separator\n").unwrap();

    let output = run_swear(dir.path(), &["status"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("malformed mapping record"), "{stderr}");
}

#[test]
fn resolve_with_unreachable_provider_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_swear(dir.path(), &["resolve"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("failed to fetch"), "{stderr}");
    assert!(!dir.path().join("version.txt").exists());
}
