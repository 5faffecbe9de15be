//! CLI integration tests for all subcommands.
//!
//! Uses `assert_cmd` to spawn the `dspf` binary and verify
//! exit codes, stdout content, and stderr content.
//!
//! All tests set `current_dir` to the workspace root so that relative
//! paths to conformance fixtures resolve correctly.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

/// Helper: create a Command for the `dspf` binary, rooted at workspace.
fn dspf() -> Command {
    let mut cmd = cargo_bin_cmd!("dspf");
    cmd.current_dir(workspace_root());
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Helper: the same binary, rooted at a scratch directory.
fn dspf_in(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("dspf");
    cmd.current_dir(dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture(name: &str) -> String {
    format!("conformance/positive/{}.dspf", name)
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("stdout is JSON")
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    dspf()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "DDS display and printer file inspector",
        ));
}

#[test]
fn version_exits_0() {
    dspf()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dspf"));
}

// ──────────────────────────────────────────────
// 2. Parse subcommand
// ──────────────────────────────────────────────

#[test]
fn parse_matches_expected_json() {
    let got = stdout_json(dspf().args(["parse", &fixture("depts")]));
    let expected: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(workspace_root().join("conformance/positive/depts.expected.json"))
            .unwrap(),
    )
    .unwrap();
    assert_eq!(got, expected);
}

#[test]
fn parse_nonexistent_file_exits_1() {
    dspf()
        .args(["parse", "nonexistent_member.dspf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not read"));
}

#[test]
fn parse_error_as_json() {
    let out = dspf()
        .args(["--output", "json", "parse", "nonexistent_member.dspf"])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let err: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(err["error"], "io");
}

#[test]
fn parse_quiet_error_prints_nothing() {
    dspf()
        .args(["--quiet", "parse", "nonexistent_member.dspf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::is_empty());
}

#[test]
fn parse_accepts_crlf_line_endings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crlf.dspf");
    fs::write(
        &path,
        "     A                                      INDARA\r\n     A          R MAIN\r\n",
    )
    .unwrap();
    let got = stdout_json(dspf().arg("parse").arg(&path));
    assert_eq!(got["formats"][1]["name"], "MAIN");
    assert_eq!(got["formats"][1]["sourceRange"]["end"], 2);
}

// ──────────────────────────────────────────────
// 3. Formats subcommand
// ──────────────────────────────────────────────

#[test]
fn formats_text_lists_every_format() {
    dspf()
        .args(["formats", &fixture("windows")])
        .assert()
        .success()
        .stdout(predicate::str::contains("GLOBAL"))
        .stdout(predicate::str::contains("HELP"))
        .stdout(predicate::str::contains("window(POPUP)"));
}

#[test]
fn formats_json_summaries() {
    let got = stdout_json(dspf().args(["--output", "json", "formats", &fixture("depts")]));
    let names: Vec<_> = got
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["GLOBAL", "SFLDTA", "SFLCTL", "FOOTER"]);
    assert_eq!(got[1]["fields"], 4);
}

// ──────────────────────────────────────────────
// 4. Show subcommand
// ──────────────────────────────────────────────

#[test]
fn show_omits_hidden_and_inactive_fields() {
    dspf()
        .args(["show", &fixture("depts"), "SFLDTA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("XNAME"))
        .stdout(predicate::str::contains("RRN").not());

    dspf()
        .args(["show", &fixture("new_cases"), "TEST_REC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FLAGGED").not());
}

#[test]
fn show_on_flag_activates_fields() {
    dspf()
        .args(["show", &fixture("new_cases"), "TEST_REC", "--on", "31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FLAGGED"));
}

#[test]
fn show_rejects_out_of_range_indicator() {
    dspf()
        .args(["show", &fixture("new_cases"), "TEST_REC", "--on", "100"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn show_window_geometry_through_reference() {
    let got = stdout_json(dspf().args(["--output", "json", "show", &fixture("windows"), "POPUP2"]));
    assert_eq!(got["window"]["originRow"], 2);
    assert_eq!(got["window"]["height"], 10);
    assert_eq!(got["window"]["width"], 70);
    assert_eq!(got["fields"][0]["value"], "Shares the POPUP window");
    assert_eq!(got["fields"][0]["length"], 23);
}

#[test]
fn show_unknown_format_exits_1() {
    dspf()
        .args(["show", &fixture("depts"), "NOSUCHFMT"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("record format not found"));
}

// ──────────────────────────────────────────────
// 5. Locate subcommand
// ──────────────────────────────────────────────

#[test]
fn locate_reports_covering_format() {
    dspf()
        .args(["locate", &fixture("depts"), "--line", "18"])
        .assert()
        .success()
        .stdout("SFLCTL\n");
}

#[test]
fn locate_past_end_exits_1() {
    dspf()
        .args(["locate", &fixture("depts"), "--line", "500"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no record format covers line 500"));
}

// ──────────────────────────────────────────────
// 6. Configuration
// ──────────────────────────────────────────────

#[test]
fn config_file_sets_output_and_indicators() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("dspf.toml"),
        "output = \"json\"\n[indicators]\non = [31]\n",
    )
    .unwrap();
    let member = workspace_root().join(fixture("new_cases"));

    let got = stdout_json(dspf_in(dir.path()).arg("show").arg(&member).arg("TEST_REC"));
    assert_eq!(got["indicators"], serde_json::json!([31]));
    let names: Vec<_> = got["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();
    assert!(names.contains(&"FLAGGED".to_string()));
}

#[test]
fn explicit_output_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("dspf.toml"), "output = \"json\"\n").unwrap();
    let member = workspace_root().join(fixture("depts"));

    dspf_in(dir.path())
        .args(["--output", "text", "locate"])
        .arg(&member)
        .args(["--line", "5"])
        .assert()
        .success()
        .stdout("SFLDTA\n");
}

#[test]
fn malformed_config_exits_1() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("broken.toml");
    fs::write(&config, "output = [").unwrap();

    dspf()
        .arg("--config")
        .arg(&config)
        .args(["formats", &fixture("depts")])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not parse"));
}

// ──────────────────────────────────────────────
// 7. Logging
// ──────────────────────────────────────────────

#[test]
fn verbose_logs_to_stderr_only() {
    let assert = dspf()
        .args(["--verbose", "--output", "json", "formats", &fixture("printer")])
        .assert()
        .success()
        .stderr(predicate::str::contains("record format finalized"));
    let stdout = assert.get_output().stdout.clone();
    assert!(serde_json::from_slice::<serde_json::Value>(&stdout).is_ok());
}

// ──────────────────────────────────────────────
// 8. Test subcommand
// ──────────────────────────────────────────────

#[test]
fn test_conformance_exits_0() {
    dspf()
        .args(["test", "conformance"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("TAP version 14"))
        .stdout(predicate::str::contains("ok 1 - positive/depts"))
        .stdout(predicate::str::contains("# fail  0"));
}

#[test]
fn test_nonexistent_dir_exits_1() {
    dspf()
        .args(["test", "nonexistent_suite_dir_xyz"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_reports_mismatch() {
    let dir = TempDir::new().unwrap();
    let positive = dir.path().join("positive");
    fs::create_dir(&positive).unwrap();
    fs::write(positive.join("one.dspf"), "     A          R MAIN\n").unwrap();
    fs::write(positive.join("one.expected.json"), "{\"formats\": []}").unwrap();
    fs::write(positive.join("orphan.dspf"), "     A          R MAIN\n").unwrap();

    dspf()
        .arg("test")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("not ok 1 - positive/one"))
        .stdout(predicate::str::contains("output mismatch"))
        .stdout(predicate::str::contains("not ok 2 - positive/orphan"))
        .stdout(predicate::str::contains("# fail  2"));
}
