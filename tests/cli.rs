//! Runs the compiled binary.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn sitesmith(project: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sitesmith"))
        .arg("--project")
        .arg(project)
        .args(args)
        .env_remove("GOOGLE_API_KEY")
        .env_remove("NANOBANA_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn scaffold_without_arguments_prints_usage() {
    let tmp = TempDir::new().unwrap();
    let output = sitesmith(tmp.path(), &["scaffold", "Bright Cuts"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage: sitesmith scaffold"));
    assert!(stderr(&output).contains("service"));
    assert!(!tmp.path().join("content.json").exists());
}

#[test]
fn scaffold_writes_content_file() {
    let tmp = TempDir::new().unwrap();
    let output = sitesmith(
        tmp.path(),
        &["scaffold", "Bright Cuts", "Hair Styling", "Newtown"],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Generated content.json for Bright Cuts"));
    assert!(out.contains("- Service: Hair Styling"));
    assert!(out.contains("- Location: Newtown"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("content.json")).unwrap())
            .unwrap();
    assert_eq!(json["business"]["name"], "Bright Cuts");
    assert_eq!(json["business"]["email"], "hello@brightcuts.com.au");
}

#[test]
fn scaffold_then_check_and_build() {
    let tmp = TempDir::new().unwrap();
    let scaffolded = sitesmith(tmp.path(), &["scaffold", "Bright Cuts", "Hair Styling", "Newtown"]);
    assert!(scaffolded.status.success());

    let check = sitesmith(tmp.path(), &["check"]);
    assert!(check.status.success(), "{}", stderr(&check));
    assert!(stdout(&check).contains("Content is valid"));

    let dist = tmp.path().join("dist");
    let build = sitesmith(tmp.path(), &["--output", dist.to_str().unwrap(), "build"]);
    assert!(build.status.success(), "{}", stderr(&build));
    assert!(dist.join("index.html").exists());
    assert!(dist.join("sitemap.xml").exists());
}

#[test]
fn images_without_api_key_exits_with_error() {
    let tmp = TempDir::new().unwrap();
    let output = sitesmith(tmp.path(), &["images"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("GOOGLE_API_KEY or NANOBANA_API_KEY"));
    assert!(!tmp.path().join("public").exists());
}

#[test]
fn gen_config_prints_stock_config() {
    let tmp = TempDir::new().unwrap();
    let output = sitesmith(tmp.path(), &["gen-config"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[images]"));
    assert!(text.contains("max_retries"));
}

#[test]
fn check_reports_missing_content() {
    let tmp = TempDir::new().unwrap();
    let output = sitesmith(tmp.path(), &["check"]);
    assert!(!output.status.success());
}
