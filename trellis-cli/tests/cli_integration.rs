//! CLI integration tests for the trellis binary.
//!
//! These tests verify:
//! - Help text and argument parsing
//! - Template scaffolding and directory scans, which need no FlowerPower
//! - Flag translation and exit-status mapping against stand-in executables
//!
//! Note: no test requires FlowerPower to be installed. The delegating
//! strategies are exercised with small shell scripts (Unix only).

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command for the trellis binary.
fn trellis() -> Command {
    let mut cmd = Command::cargo_bin("trellis").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("TRELLIS_FLOWERPOWER_BIN")
        .env_remove("TRELLIS_PYTHON");
    cmd
}

fn create_template(root: &Path, name: &str) {
    trellis()
        .args(["create", name, "--template-only", "-p"])
        .arg(root)
        .assert()
        .success();
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Argument Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_subcommands() {
    trellis()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_run_help_lists_flags() {
    trellis()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--inputs"))
        .stdout(predicate::str::contains("--final-vars"))
        .stdout(predicate::str::contains("--executor"))
        .stdout(predicate::str::contains("--retry-delay"))
        .stdout(predicate::str::contains("--run-config"));
}

#[test]
fn test_unknown_executor_rejected() {
    trellis()
        .args(["run", "etl", "--executor", "gpu"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_template_only_conflicts_with_use_api() {
    trellis()
        .args(["create", "etl", "--template-only", "--use-api"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_malformed_inputs_name_the_flag() {
    let dir = TempDir::new().unwrap();

    trellis()
        .args(["run", "etl", "--inputs", "{not json", "-p"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--inputs"));
}

#[test]
fn test_malformed_final_vars_name_the_flag() {
    trellis()
        .args(["run", "etl", "--final-vars", "output_a"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--final-vars"));
}

#[test]
fn test_non_finite_retry_delay_rejected() {
    for delay in ["NaN", "inf"] {
        trellis()
            .args(["run", "etl", "--use-api", "--retry-delay", delay])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid value for --retry-delay"));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Template and Scan Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_create_template_writes_module_and_config() {
    let dir = TempDir::new().unwrap();

    trellis()
        .args(["create", "etl_process", "--template-only", "-p"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pipeline created"))
        .stdout(predicate::str::contains("etl_process.py"))
        .stdout(predicate::str::contains("Next steps"));

    let module = fs::read_to_string(dir.path().join("pipelines/etl_process.py")).unwrap();
    assert!(module.contains("def final_output"));

    let config = fs::read_to_string(dir.path().join("conf/pipelines/etl_process.yml")).unwrap();
    assert!(config.contains("final_output"));
}

#[test]
fn test_scan_lists_created_pipelines() {
    let dir = TempDir::new().unwrap();
    create_template(dir.path(), "report");
    create_template(dir.path(), "etl_process");

    trellis()
        .args(["list", "--scan", "--format", "simple", "-p"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout("etl_process\nreport\n");
}

#[test]
fn test_scan_table_flags_missing_config() {
    let dir = TempDir::new().unwrap();
    create_template(dir.path(), "etl_process");
    fs::remove_file(dir.path().join("conf/pipelines/etl_process.yml")).unwrap();
    fs::write(dir.path().join("pipelines/_helpers.py"), "").unwrap();

    trellis()
        .args(["list", "--scan", "-p"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[MISSING CONFIG]"))
        .stdout(predicate::str::contains("Total: 1 pipeline(s)"))
        .stdout(predicate::str::contains("_helpers").not());
}

#[test]
fn test_scan_table_of_empty_project_keeps_total() {
    let dir = TempDir::new().unwrap();

    trellis()
        .args(["list", "--scan", "-p"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pipelines in"))
        .stdout(predicate::str::contains("Total: 0 pipeline(s)"));
}

#[test]
fn test_scan_json_output() {
    let dir = TempDir::new().unwrap();
    create_template(dir.path(), "etl_process");

    let output = trellis()
        .args(["list", "--scan", "-f", "json", "-p"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["name"], "etl_process");
    assert_eq!(value[0]["has_config"], true);
}

#[test]
fn test_create_conflict_then_overwrite() {
    let dir = TempDir::new().unwrap();
    create_template(dir.path(), "etl_process");

    trellis()
        .args(["create", "etl_process", "--template-only", "-p"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("Use --overwrite"));

    trellis()
        .args(["create", "etl_process", "--template-only", "--overwrite", "-p"])
        .arg(dir.path())
        .assert()
        .success();
}

#[test]
fn test_hyphenated_name_is_normalized() {
    let dir = TempDir::new().unwrap();

    trellis()
        .args(["create", "my-pipe", "--template-only", "-p"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("my_pipe"));

    assert!(dir.path().join("pipelines/my_pipe.py").is_file());
    assert!(!dir.path().join("pipelines/my-pipe.py").exists());
}

#[test]
fn test_missing_executable_is_reported() {
    trellis()
        .args(["--flowerpower-bin", "trellis-no-such-flowerpower", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("trellis-no-such-flowerpower"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Delegation Tests (stand-in executables)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(unix)]
mod delegation {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    /// Records its arguments, one per line, and exits with `$FAKE_EXIT`
    const FAKE_FLOWERPOWER: &str = r#"#!/bin/sh
if [ "$1" = "--help" ]; then
    exit 0
fi
printf '%s\n' "$@" > "$FAKE_LOG"
exit "${FAKE_EXIT:-0}"
"#;

    /// Records the bridge request and answers with `$FAKE_RESPONSE`
    const FAKE_PYTHON: &str = r#"#!/bin/sh
cat > "$FAKE_LOG"
printf '%s' "$FAKE_RESPONSE"
"#;

    fn install_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_run_translates_flags() {
        let dir = TempDir::new().unwrap();
        let bin = install_script(dir.path(), "flowerpower", FAKE_FLOWERPOWER);
        let log = dir.path().join("calls.log");

        trellis()
            .env("TRELLIS_FLOWERPOWER_BIN", &bin)
            .env("FAKE_LOG", &log)
            .args([
                "run",
                "etl-job",
                "-i",
                r#"{"key":"value"}"#,
                "-o",
                r#"["output_a","output_b"]"#,
                "--retry-delay",
                "1",
            ])
            .assert()
            .success();

        let calls = fs::read_to_string(&log).unwrap();
        assert!(calls.starts_with("pipeline\nrun\netl_job\n"));
        assert!(calls.contains("--inputs\n{\"key\": \"value\"}\n"));
        assert!(calls.contains("--final-vars\n[\"output_a\", \"output_b\"]\n"));
        assert!(calls.contains("--retry-delay\n1.0\n"));
        assert!(!calls.contains("--executor"));
    }

    #[test]
    fn test_external_failure_exits_one() {
        let dir = TempDir::new().unwrap();
        let bin = install_script(dir.path(), "flowerpower", FAKE_FLOWERPOWER);

        trellis()
            .env("TRELLIS_FLOWERPOWER_BIN", &bin)
            .env("FAKE_LOG", dir.path().join("calls.log"))
            .env("FAKE_EXIT", "3")
            .args(["run", "etl"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("exited with status 3"));
    }

    #[test]
    fn test_list_delegates_format() {
        let dir = TempDir::new().unwrap();
        let bin = install_script(dir.path(), "flowerpower", FAKE_FLOWERPOWER);
        let log = dir.path().join("calls.log");

        trellis()
            .env("TRELLIS_FLOWERPOWER_BIN", &bin)
            .env("FAKE_LOG", &log)
            .args(["list", "-f", "json"])
            .assert()
            .success();

        let calls = fs::read_to_string(&log).unwrap();
        assert_eq!(calls, "pipeline\nshow-pipelines\n--format\njson\n");
    }

    #[test]
    fn test_api_run_prints_results() {
        let dir = TempDir::new().unwrap();
        let python = install_script(dir.path(), "python", FAKE_PYTHON);
        let log = dir.path().join("request.json");

        trellis()
            .env("TRELLIS_PYTHON", &python)
            .env("FAKE_LOG", &log)
            .env("FAKE_RESPONSE", r#"{"ok": {"final_output": "done"}}"#)
            .args(["run", "etl", "--use-api", "-e", "threadpool", "-w", "4", "-p"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Pipeline completed!"))
            .stdout(predicate::str::contains("\"final_output\": \"done\""));

        let request: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&log).unwrap()).unwrap();
        assert_eq!(request["op"], "run");
        assert_eq!(request["name"], "etl");
        assert_eq!(
            request["options"],
            serde_json::json!({"executor": {"type": "threadpool", "max_workers": 4}})
        );
    }

    #[test]
    fn test_api_library_error_is_reported() {
        let dir = TempDir::new().unwrap();
        let python = install_script(dir.path(), "python", FAKE_PYTHON);

        trellis()
            .env("TRELLIS_PYTHON", &python)
            .env("FAKE_LOG", dir.path().join("request.json"))
            .env(
                "FAKE_RESPONSE",
                r#"{"error": {"kind": "ValueError", "message": "pipeline etl not found"}}"#,
            )
            .args(["run", "etl", "--use-api"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("ValueError: pipeline etl not found"));
    }
}
