//! End-to-end tests that run the compiled binary against a scratch tree.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn write_night(root: &Path, night: &str, yaml: &str) {
    let dir = root.join(night);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{night}.yaml")), yaml).unwrap();
}

/// Scratch tree with two merged nights and one skipped night.
fn scratch() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("CI");
    write_night(
        &root,
        "20190912",
        "- EXPID: '00004521'\n  RA: 150.1\n  DEC: 2.2\n- EXPID: '00004522'\n",
    );
    write_night(&root, "20190913", "- EXPID: '00004602'\n");
    fs::create_dir_all(root.join("20190914")).unwrap();
    tmp
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_night-gallery"))
        .current_dir(dir)
        .env_remove("SCRATCH")
        .args(args)
        .output()
        .expect("failed to run night-gallery")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn merge_writes_dataset_and_reports_skips() {
    let tmp = scratch();
    let out = run(tmp.path(), &["merge", "--scratch", "CI"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let text = stdout(&out);
    assert!(text.contains("001 20190912 (2 exposures)"));
    assert!(text.contains("Skipped: no 20190914.yaml"));
    assert!(text.contains("Merged 3 exposures from 2 nights"));

    let merged: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("merged.json")).unwrap())
            .unwrap();
    assert_eq!(merged["20190912"][0]["EXPID"], "00004521");
    assert!(merged.get("20190914").is_none());
}

#[test]
fn merge_uses_scratch_env() {
    let tmp = scratch();
    let out = Command::new(env!("CARGO_BIN_EXE_night-gallery"))
        .current_dir(tmp.path())
        .env("SCRATCH", tmp.path())
        .arg("merge")
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(tmp.path().join("merged.json").exists());
}

#[test]
fn merge_without_scratch_fails() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["merge"]);
    assert!(!out.status.success());
}

#[test]
fn build_produces_site() {
    let tmp = scratch();
    let out = run(tmp.path(), &["build", "--scratch", "CI"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("==> Build complete"));

    let index = fs::read_to_string(tmp.path().join("dist/index.html")).unwrap();
    let newest = index.find(">20190913<").unwrap();
    let oldest = index.find(">20190912<").unwrap();
    assert!(newest < oldest, "newest night should be listed first");

    let night = fs::read_to_string(tmp.path().join("dist/nights/20190912.html")).unwrap();
    assert_eq!(night.matches(r#"class="thumb""#).count(), 2);
    assert!(night.contains(
        "https://portal.nersc.gov/project/desi/users/dkirkby/CI/20190912/00004521.jpg"
    ));
    assert!(night.contains("nightsum-2019-09-12/nightsum.html"));
}

#[test]
fn config_switches_to_first_variant() {
    let tmp = scratch();
    fs::write(
        tmp.path().join("night-gallery.toml"),
        "[navigation]\norder = \"ascending\"\n\n[summary]\nenabled = false\n",
    )
    .unwrap();
    let out = run(tmp.path(), &["build", "--scratch", "CI"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let index = fs::read_to_string(tmp.path().join("dist/index.html")).unwrap();
    assert!(index.find(">20190912<").unwrap() < index.find(">20190913<").unwrap());
    let night = fs::read_to_string(tmp.path().join("dist/nights/20190912.html")).unwrap();
    assert!(!night.contains("nightsum-"));
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = scratch();
    fs::write(tmp.path().join("night-gallery.toml"), "[lazy]\nthreshhold = 1\n").unwrap();
    let out = run(tmp.path(), &["build", "--scratch", "CI"]);
    assert!(!out.status.success());
}

#[test]
fn show_prints_panel() {
    let tmp = scratch();
    assert!(run(tmp.path(), &["merge", "--scratch", "CI"]).status.success());

    let out = run(tmp.path(), &["show", "20190912"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = stdout(&out);
    assert!(text.starts_with("20190912 (2 exposures)"));
    assert!(text.contains("001 00004521 → https://"));
    assert!(text.contains("RA 150.1000, DEC 2.2000"));
}

#[test]
fn show_unknown_night_fails() {
    let tmp = scratch();
    assert!(run(tmp.path(), &["merge", "--scratch", "CI"]).status.success());
    let out = run(tmp.path(), &["show", "19990101"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("19990101"));
}

#[test]
fn gen_config_prints_stock_toml() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["gen-config"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("[navigation]"));
    assert!(text.contains("threshold = 1500"));
}
