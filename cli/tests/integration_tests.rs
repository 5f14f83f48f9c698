use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_schema-args"))
}

/// Declaration used by most tests, written as YAML.
fn write_declaration(dir: &Path) -> PathBuf {
    let yaml = r#"name: parser
description: Sample program
path: true
help:
  name: --help
  short: -h
schema:
  flag:
    type: string
    short: -f
    required: true
  test:
    type: number
  new:
    type: boolean
"#;
    let path = dir.join("parser.yaml");
    fs::write(&path, yaml).expect("failed to write declaration");
    path
}

fn run_parse(config: &Path, cwd: &str, args: &[&str]) -> Output {
    Command::new(bin())
        .args(["parse", "--config"])
        .arg(config)
        .args(["--cwd", cwd, "--"])
        .args(args)
        .output()
        .expect("failed to run schema-args")
}

#[test]
fn parse_prints_json_result() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_declaration(dir.path());

    let output = run_parse(&config, "/work", &["test/path", "--flag=\"test\"", "--test=2", "--new"]);
    assert!(
        output.status.success(),
        "parse failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Invalid JSON output: {e}\n{stdout}"));
    assert_eq!(parsed["path"]["selected"], "/work/test/path");
    assert_eq!(parsed["values"]["flag"], "test");
    assert_eq!(parsed["values"]["test"], 2.0);
    assert_eq!(parsed["values"]["new"], true);
}

#[test]
fn parse_prints_yaml_result() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_declaration(dir.path());

    let output = Command::new(bin())
        .args(["parse", "--format", "yaml", "--cwd", "/work", "--config"])
        .arg(&config)
        .args(["--", "dir", "-f=x"])
        .output()
        .expect("failed to run schema-args");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("working: /work"), "unexpected output:\n{stdout}");
    assert!(stdout.contains("flag: x"), "unexpected output:\n{stdout}");
}

#[test]
fn parse_prints_help_and_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_declaration(dir.path());

    let output = run_parse(&config, "/work", &["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Program : parser\nDescription : Sample program\n"));
    assert!(stdout.contains("Usage : parser [PATH] [OPTION]\n"));
}

#[test]
fn parse_prints_scoped_help() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_declaration(dir.path());

    let output = run_parse(&config, "/work", &["--test", "-h"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "|Name : --test\n|Type : number\n|Required : No\n|Example : --test=3\n"
    );
}

#[test]
fn parse_reports_missing_required() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_declaration(dir.path());

    let output = run_parse(&config, "/work", &["test/path"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr).trim(),
        "error: --flag is required"
    );
}

#[test]
fn parse_reports_unknown_option() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_declaration(dir.path());

    let output = run_parse(&config, "/work", &["p", "--flag=x", "--unknown"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--unknown arguments not found"));
}

#[test]
fn parse_reports_unreadable_declaration() {
    let output = run_parse(Path::new("/no/such/declaration.json"), "/work", &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn validate_accepts_good_and_rejects_duplicate_shorts() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_declaration(dir.path());
    let bad = dir.path().join("bad.json");
    fs::write(
        &bad,
        r#"{
  "schema": {
    "force": { "type": "boolean", "short": "-f" },
    "file": { "type": "path", "short": "-f" }
  }
}"#,
    )
    .unwrap();

    let output = Command::new(bin())
        .arg("validate")
        .arg(&good)
        .output()
        .expect("failed to run schema-args");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("ok (3 option(s))"));

    let output = Command::new(bin())
        .args(["validate"])
        .arg(&good)
        .arg(&bad)
        .output()
        .expect("failed to run schema-args");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate flag: -f"));
}
