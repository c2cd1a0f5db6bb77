use assert_cmd::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

fn autofiller(workdir: &Path) -> Command {
    let bin = assert_cmd::cargo::cargo_bin!("autofiller");
    let mut cmd = Command::new(bin);
    cmd.current_dir(workdir)
        .env_remove("RUST_LOG")
        .args(["--config", "missing.yaml", "--log-level", "warn"]);
    cmd
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn stdout_json(assert: assert_cmd::assert::Assert) -> Value {
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn catalog_lists_entries_in_match_order() {
    let dir = tempfile::tempdir().unwrap();
    let assert = autofiller(dir.path())
        .args(["--output", "json", "catalog"])
        .assert()
        .success();
    let entries = stdout_json(assert);
    let entries = entries.as_array().unwrap();
    assert_eq!(entries[0]["pattern"], "sponsorship");
    assert_eq!(entries[0]["fixedValue"], "No");
    assert_eq!(entries.last().unwrap()["pattern"], "date");
}

#[test]
fn resolve_reports_the_clearance_level_select() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("profile.json");
    std::fs::write(&profile, r#"{"securityClearanceLevel": "secret"}"#).unwrap();

    let assert = autofiller(dir.path())
        .args(["--output", "json", "resolve", "DoD Security Clearance Level", "--profile"])
        .arg(&profile)
        .assert()
        .success();
    let out = stdout_json(assert);
    assert_eq!(out["resolution"]["entry"]["field"], "securityClearanceLevel");
    assert_eq!(out["resolution"]["entry"]["widget"]["kind"], "select");
    assert_eq!(out["resolution"]["value"], "secret");
}

#[test]
fn resolve_without_a_match_is_null() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("profile.yaml");
    std::fs::write(&profile, "phone: 555-0100\n").unwrap();
    let assert = autofiller(dir.path())
        .args(["--output", "json", "resolve", "Favourite colour", "--profile"])
        .arg(&profile)
        .assert()
        .success();
    assert!(stdout_json(assert)["resolution"].is_null());
}

#[test]
fn fill_writes_the_filled_page() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("profile.yaml");
    std::fs::write(
        &profile,
        "phone: 555-0100\nyearsOfJavaScript: 4\nzipCode: \"78701\"\nrequireSponsorship: true\n",
    )
    .unwrap();
    let out = dir.path().join("filled.html");

    let assert = autofiller(dir.path())
        .args(["--output", "json", "fill", "--page"])
        .arg(fixture("apply_page.html"))
        .arg("--profile")
        .arg(&profile)
        .arg("--out")
        .arg(&out)
        .args(["--url", "https://smartapply.indeed.com/beta/indeedapply/form/questions/1"])
        .assert()
        .success();
    let report = stdout_json(assert);
    assert_eq!(report["filled"], 4);
    assert_eq!(report["direct_filled"], 1);
    assert_eq!(report["trigger"], "Manual");

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("555-0100"));
    assert!(html.contains("78701"));
    assert!(!html.contains("autofiller-toast"));
}

#[test]
fn fill_can_render_the_toast() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("profile.json");
    std::fs::write(&profile, r#"{"phone": "555-0100"}"#).unwrap();
    let out = dir.path().join("filled.html");

    autofiller(dir.path())
        .args(["fill", "--toast", "--page"])
        .arg(fixture("apply_page.html"))
        .arg("--profile")
        .arg(&profile)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("autofiller-toast"));
    assert!(html.contains("Autofiller: Filled 2 fields"));
}

#[test]
fn fill_with_an_unreadable_profile_fails() {
    let dir = tempfile::tempdir().unwrap();
    autofiller(dir.path())
        .args(["fill", "--page"])
        .arg(fixture("apply_page.html"))
        .args(["--profile", "nope.json"])
        .assert()
        .failure();
}

#[test]
fn human_output_summarizes_the_pass() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("profile.json");
    std::fs::write(&profile, r#"{"phone": "555-0100"}"#).unwrap();
    let assert = autofiller(dir.path())
        .args(["fill", "--page"])
        .arg(fixture("apply_page.html"))
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.starts_with("Filled 2 field(s)"));
    assert!(stdout.contains("what is your phone number? -> phone"));
}
