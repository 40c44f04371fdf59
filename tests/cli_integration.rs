//! CLI integration tests for upbt.
//!
//! These tests run the real binary against a temporary data directory
//! (`UPBT_HOME`) so nothing leaks into the user's settings.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the upbt binary command rooted at a temp data dir.
fn upbt(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("upbt").unwrap();
    cmd.env("UPBT_HOME", home);
    cmd.env_remove("UPBT_LAUNCHER_MANIFEST");
    cmd
}

fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write_plugin(dir: &Path) -> PathBuf {
    let path = dir.join("Foo.uplugin");
    fs::write(&path, r#"{"FriendlyName": "Foo", "VersionName": "1.0"}"#).unwrap();
    path
}

/// Create a fake engine install whose RunUAT script runs `body`.
#[cfg(unix)]
fn fake_engine(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let root = dir.join(name);
    let scripts = root.join("Engine/Build/BatchFiles");
    fs::create_dir_all(&scripts).unwrap();

    let uat = scripts.join("RunUAT.sh");
    fs::write(&uat, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&uat, fs::Permissions::from_mode(0o755)).unwrap();

    root
}

// ============================================================================
// upbt engines
// ============================================================================

#[test]
fn test_engines_list_empty() {
    let tmp = temp_dir();

    upbt(tmp.path())
        .args(["engines", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no engine installs found"));
}

#[test]
fn test_engines_add_and_list() {
    let tmp = temp_dir();

    upbt(tmp.path())
        .args(["engines", "add", "UE_Source", "/opt/ue-src"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Added"));

    upbt(tmp.path())
        .args(["engines", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UE_Source"))
        .stdout(predicate::str::contains("/opt/ue-src"));
}

#[test]
fn test_engines_add_empty_name_fails() {
    let tmp = temp_dir();

    upbt(tmp.path())
        .args(["engines", "add", "", "/x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));

    // Nothing was persisted.
    upbt(tmp.path())
        .args(["engines", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no engine installs found"));
}

#[test]
fn test_engines_remove_takes_all_matches() {
    let tmp = temp_dir();

    for path in ["/a", "/b"] {
        upbt(tmp.path())
            .args(["engines", "add", "Dup", path])
            .assert()
            .success();
    }
    upbt(tmp.path())
        .args(["engines", "add", "Keep", "/c"])
        .assert()
        .success();

    upbt(tmp.path())
        .args(["engines", "remove", "Dup"])
        .assert()
        .success()
        .stderr(predicate::str::contains("2 install(s)"));

    upbt(tmp.path())
        .args(["engines", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep"))
        .stdout(predicate::str::contains("Dup").not());
}

#[test]
fn test_engines_remove_missing_warns() {
    let tmp = temp_dir();

    upbt(tmp.path())
        .args(["engines", "remove", "Nope"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no custom install named"));
}

#[test]
fn test_manifest_installs_listed_before_customs() {
    let tmp = temp_dir();
    let manifest = tmp.path().join("LauncherInstalled.dat");
    fs::write(
        &manifest,
        r#"{"InstallationList": [
            {"AppName": "UE_4.17", "InstallLocation": "/launcher/4.17"},
            {"AppName": "ConfigBPPlugin_4.17", "InstallLocation": "/plugins/cbp"}
        ]}"#,
    )
    .unwrap();

    upbt(tmp.path())
        .args(["engines", "add", "Custom", "/custom"])
        .assert()
        .success();

    let output = upbt(tmp.path())
        .args(["engines", "list"])
        .env("UPBT_LAUNCHER_MANIFEST", &manifest)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let launcher_pos = stdout.find("UE_4.17").unwrap();
    let custom_pos = stdout.find("Custom").unwrap();
    assert!(launcher_pos < custom_pos, "manifest installs come first");
    // Non-engine manifest entries are filtered out.
    assert!(!stdout.contains("ConfigBPPlugin"));
}

// ============================================================================
// global output flags
// ============================================================================

#[test]
fn test_quiet_suppresses_status_output() {
    let tmp = temp_dir();

    upbt(tmp.path())
        .args(["engines", "add", "UE_Source", "/opt/ue-src", "--quiet"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    // The install was still persisted.
    upbt(tmp.path())
        .args(["engines", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UE_Source"));
}

#[test]
fn test_color_always_emits_ansi_codes() {
    let tmp = temp_dir();

    upbt(tmp.path())
        .args(["engines", "add", "UE_Source", "/opt/ue-src", "--color", "always"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\u{1b}["));
}

#[test]
fn test_invalid_color_choice_rejected() {
    let tmp = temp_dir();

    upbt(tmp.path())
        .args(["engines", "list", "--color", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid color choice"));
}

#[test]
fn test_unknown_message_format_rejected() {
    let tmp = temp_dir();

    upbt(tmp.path())
        .args(["build", "Foo.uplugin", "--message-format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ============================================================================
// upbt config
// ============================================================================

#[test]
fn test_config_show_default_format() {
    let tmp = temp_dir();

    upbt(tmp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("%n/%v/%e"))
        .stdout(predicate::str::contains("(default)"));
}

#[test]
fn test_config_set_format_persists() {
    let tmp = temp_dir();

    upbt(tmp.path())
        .args(["config", "set-format", "/Builds/%n/%v/%e"])
        .assert()
        .success();

    upbt(tmp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/Builds/%n/%v/%e"))
        .stdout(predicate::str::contains("(default)").not());
}

// ============================================================================
// upbt build
// ============================================================================

#[test]
fn test_build_unknown_engine_fails() {
    let tmp = temp_dir();
    let plugin = write_plugin(tmp.path());

    upbt(tmp.path())
        .args(["build"])
        .arg(&plugin)
        .args(["--engine", "UE_Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no engine install named"));
}

#[test]
fn test_build_without_installs_fails() {
    let tmp = temp_dir();
    let plugin = write_plugin(tmp.path());

    upbt(tmp.path())
        .args(["build"])
        .arg(&plugin)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no engine installs found"));
}

#[test]
#[cfg(unix)]
fn test_build_success_end_to_end() {
    let tmp = temp_dir();
    let plugin = write_plugin(tmp.path());
    let engine = fake_engine(tmp.path(), "UE_4.17", "echo packaged; exit 0");

    upbt(tmp.path())
        .args(["engines", "add", "UE_4.17"])
        .arg(&engine)
        .assert()
        .success();

    upbt(tmp.path())
        .args(["build"])
        .arg(&plugin)
        .args(["--engine", "UE_4.17"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Finished"));

    // Target directory derived from the default template exists.
    let target = tmp.path().join("BuiltPlugins/Foo/1.0/UE_4.17");
    assert!(target.is_dir());
}

#[test]
#[cfg(unix)]
fn test_build_failure_shows_tool_output() {
    let tmp = temp_dir();
    let plugin = write_plugin(tmp.path());
    let engine = fake_engine(
        tmp.path(),
        "UE_4.17",
        "echo compile error in FooModule; exit 1",
    );

    upbt(tmp.path())
        .args(["engines", "add", "UE_4.17"])
        .arg(&engine)
        .assert()
        .success();

    upbt(tmp.path())
        .args(["build"])
        .arg(&plugin)
        .args(["--engine", "UE_4.17"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("compile error in FooModule"))
        .stderr(predicate::str::contains("exited with code 1"));
}

#[test]
#[cfg(unix)]
fn test_build_killed_tool_reports_abnormal_exit() {
    let tmp = temp_dir();
    let plugin = write_plugin(tmp.path());
    // The fake tool kills its own shell, leaving no exit code.
    let engine = fake_engine(tmp.path(), "UE_4.17", "kill -9 $$");

    upbt(tmp.path())
        .args(["engines", "add", "UE_4.17"])
        .arg(&engine)
        .assert()
        .success();

    upbt(tmp.path())
        .args(["build"])
        .arg(&plugin)
        .args(["--engine", "UE_4.17"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("terminated abnormally"));
}

#[test]
#[cfg(unix)]
fn test_build_json_events() {
    let tmp = temp_dir();
    let plugin = write_plugin(tmp.path());
    let engine = fake_engine(tmp.path(), "UE_4.17", "exit 0");

    upbt(tmp.path())
        .args(["engines", "add", "UE_4.17"])
        .arg(&engine)
        .assert()
        .success();

    upbt(tmp.path())
        .args(["build"])
        .arg(&plugin)
        .args(["--engine", "UE_4.17", "--message-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reason\":\"build-started\""))
        .stdout(predicate::str::contains("\"reason\":\"build-progress\""))
        .stdout(predicate::str::contains("\"reason\":\"build-succeeded\""));
}

#[test]
#[cfg(unix)]
fn test_build_respects_format_override() {
    let tmp = temp_dir();
    let plugin = write_plugin(tmp.path());
    let engine = fake_engine(tmp.path(), "UE_4.17", "exit 0");
    let out_root = tmp.path().join("Out");

    upbt(tmp.path())
        .args(["engines", "add", "UE_4.17"])
        .arg(&engine)
        .assert()
        .success();

    upbt(tmp.path())
        .args(["config", "set-format"])
        .arg(format!("{}/%e/%n", out_root.display()))
        .assert()
        .success();

    upbt(tmp.path())
        .args(["build"])
        .arg(&plugin)
        .assert()
        .success();

    assert!(out_root.join("UE_4.17/Foo").is_dir());
}
