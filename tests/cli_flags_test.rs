//! CLI flag contract tests
//!
//! Verifies `check`, `scan` (--format, --output, --fail-on, stdin, config
//! defaults, input order), `rules` and `init` against the built binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_async-naming")
}

const DECLARATIONS: &str = r#"[
  {"name": "LoadAsync", "is_async": true, "file": "src/Repo.cs", "line": 3},
  {"name": "Save", "is_async": true, "file": "src/Repo.cs", "line": 9},
  {"name": "DeleteAsycn", "is_async": true, "file": "src/Repo.cs", "line": 15},
  {"name": "AsyncFind", "is_async": true, "file": "src/Repo.cs", "line": 21},
  {"name": "Dispose", "is_async": false, "file": "src/Repo.cs", "line": 27}
]"#;

fn setup_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("decls.json"), DECLARATIONS).unwrap();
    dir
}

fn run(dir: &Path, args: &[&str]) -> (i32, String) {
    let output = Command::new(bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run async-naming");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    (output.status.code().unwrap_or(-1), stdout)
}

fn json_findings(stdout: &str) -> Vec<serde_json::Value> {
    let v: serde_json::Value = serde_json::from_str(stdout).expect("Invalid JSON");
    v["findings"].as_array().unwrap().clone()
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_reports_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout) = run(dir.path(), &["check", "DoWork"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("missing-suffix"), "stdout: {stdout}");
    assert!(stdout.contains("DoWorkAsync"), "stdout: {stdout}");
}

#[test]
fn test_check_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout) = run(dir.path(), &["check", "DoAsyncWork", "--format", "json"]);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(v["verdict"], "misplaced-suffix");
    assert_eq!(v["message"], "Wrong position of the \"Async\" postfix");
    assert_eq!(v["suggested_name"], "DoWorkAsync");
}

#[test]
fn test_check_sync_is_compliant() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout) = run(dir.path(), &["check", "DoWork", "--sync", "--format", "json"]);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(v["verdict"], "compliant");
    assert!(v.get("message").is_none());
}

// ============================================================================
// scan
// ============================================================================

#[test]
fn test_scan_json_findings() {
    let dir = setup_dir();
    let (code, stdout) = run(dir.path(), &["scan", "decls.json", "--format", "json"]);
    assert_eq!(code, 0);

    let findings = json_findings(&stdout);
    let verdicts: Vec<&str> = findings
        .iter()
        .map(|f| f["verdict"].as_str().unwrap())
        .collect();
    assert_eq!(
        verdicts,
        vec!["missing-suffix", "misspelled-suffix", "misplaced-suffix"]
    );

    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["total_declarations"], 5);
    assert_eq!(v["async_declarations"], 4);
    assert_eq!(v["compliant"], 1);
}

#[test]
fn test_scan_text_output() {
    let dir = setup_dir();
    let (code, stdout) = run(dir.path(), &["scan", "decls.json"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("FINDINGS (3 total)"), "stdout: {stdout}");
    assert!(stdout.contains("SaveAsync"));
    assert!(!stdout.contains("\x1b["), "piped text output should be plain");
}

#[test]
fn test_scan_sarif_to_file() {
    let dir = setup_dir();
    let (code, stdout) = run(
        dir.path(),
        &["scan", "decls.json", "--format", "sarif", "-o", "naming.sarif"],
    );
    assert_eq!(code, 0);
    assert!(stdout.is_empty());

    let sarif = std::fs::read_to_string(dir.path().join("naming.sarif")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&sarif).unwrap();
    assert_eq!(v["runs"][0]["results"].as_array().unwrap().len(), 3);
    assert_eq!(
        v["runs"][0]["results"][0]["ruleId"],
        "AsyncConvention/missing-suffix"
    );
}

#[test]
fn test_scan_fail_on() {
    let dir = setup_dir();
    let (code, _) = run(dir.path(), &["scan", "decls.json", "--fail-on", "info"]);
    assert_eq!(code, 1);

    // Findings default to info, so a higher threshold passes
    let (code, _) = run(dir.path(), &["scan", "decls.json", "--fail-on", "low"]);
    assert_eq!(code, 0);
}

#[test]
fn test_scan_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(bin())
        .args(["scan", "-", "--format", "json"])
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn async-naming");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"{\"name\": \"Fetch\", \"is_async\": true}\n{\"name\": \"FetchAsync\", \"is_async\": true}\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let findings = json_findings(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["name"], "Fetch");
}

#[test]
fn test_scan_respects_config() {
    let dir = setup_dir();
    std::fs::write(
        dir.path().join("async-naming.toml"),
        r#"
[rule]
severity = "high"

[exclude]
names = ["Save"]

[defaults]
format = "json"
"#,
    )
    .unwrap();

    let (code, stdout) = run(dir.path(), &["scan", "decls.json"]);
    assert_eq!(code, 0);
    let findings = json_findings(&stdout);
    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|f| f["severity"] == "high"));
    assert!(findings.iter().all(|f| f["name"] != "Save"));
}

#[test]
fn test_scan_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _) = run(dir.path(), &["scan", "missing.json"]);
    assert_ne!(code, 0);
}

// ============================================================================
// rules
// ============================================================================

#[test]
fn test_rules_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout) = run(dir.path(), &["rules", "--format", "json"]);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(v["detectors"][0]["name"], "async-suffix");
    assert_eq!(v["rules"].as_array().unwrap().len(), 3);
}

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_creates_config() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(dir.path().join("async-naming.toml").exists());

    let (code, _) = run(dir.path(), &["init"]);
    assert_ne!(code, 0, "init must not overwrite an existing config");
}
