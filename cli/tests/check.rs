#![cfg(unix)]

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const REPORT: &str = r#"{"actions":[],"advisories":{"1500":{"id":1500,"module_name":"yargs-parser","severity":"low","title":"Prototype Pollution","overview":"Prototype pollution in yargs-parser","vulnerable_versions":"<13.1.2","patched_versions":">=13.1.2","url":"https://npmjs.com/advisories/1500"}},"muted":[],"metadata":{}}"#;

/// A project root plus a scripted `npm` living outside of it.
struct Fixture {
    project: TempDir,
    bin: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("package.json"), r#"{"name":"app"}"#).unwrap();
        Self {
            project,
            bin: TempDir::new().unwrap(),
        }
    }

    fn root(&self) -> &Path {
        self.project.path()
    }

    fn lockfile(&self) -> PathBuf {
        self.root().join("package-lock.json")
    }

    fn calls(&self) -> String {
        fs::read_to_string(self.bin.path().join("calls.log")).unwrap_or_default()
    }

    fn with_lockfile(self) -> Self {
        fs::write(self.lockfile(), r#"{"lockfileVersion":1}"#).unwrap();
        self
    }

    /// Install a fake npm whose `install` and `audit` run the given shell snippets.
    fn npm(self, install: &str, audit: &str) -> Self {
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> '{log}'\ncase \"$1\" in\n  install)\n{install}\n    ;;\n  audit)\n{audit}\n    ;;\nesac\n",
            log = self.bin.path().join("calls.log").display(),
        );
        let path = self.bin.path().join("npm");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        self
    }

    fn config(self, exceptions_yaml: &str) -> Self {
        let yaml = format!(
            "ecosystems:\n  npm:\n    binary: '{}'\n    timeout_secs: 30\n    exceptions:{}\n",
            self.bin.path().join("npm").display(),
            exceptions_yaml
        );
        fs::write(self.root().join("auditgate.yaml"), yaml).unwrap();
        self
    }

    fn check(&self) -> Command {
        let mut cmd = Command::cargo_bin("auditgate").unwrap();
        cmd.arg("check").arg("--json").arg("--path").arg(self.root());
        cmd
    }

    fn run_json(&self, expected_code: i32) -> Value {
        let output = self.check().assert().code(expected_code).get_output().stdout.clone();
        serde_json::from_slice(&output).unwrap()
    }
}

fn audit_findings() -> String {
    format!("cat <<'JSON'\n{}\nJSON\nexit 1", REPORT)
}

const INSTALL_OK: &str = "echo '{}' > package-lock.json";
const AUDIT_CLEAN: &str = "echo '{}'\nexit 0";
const ACCEPTED: &str = "\n      - advisory_id: \"1500\"\n        changed_by: alice\n        notes: accepted";

#[test]
fn clean_audit_removes_generated_lockfile() {
    let fx = Fixture::new().npm(INSTALL_OK, AUDIT_CLEAN).config(" []");

    let json = fx.run_json(0);

    assert_eq!(json["results"]["npm"]["status"]["status"], "passed");
    assert!(fx.calls().contains("install --package-lock-only"));
    assert!(fx.calls().contains("audit --json"));
    assert!(!fx.lockfile().exists());
}

#[test]
fn accepted_advisory_passes_and_keeps_lockfile() {
    let fx = Fixture::new()
        .with_lockfile()
        .npm("exit 99", &audit_findings())
        .config(ACCEPTED);

    let json = fx.run_json(0);
    let result = &json["results"]["npm"];

    assert_eq!(result["status"]["status"], "passed");
    assert_eq!(result["info"]["exceptions"][0]["changed_by"], "alice");
    assert_eq!(
        result["info"]["npm_audit_output"][0]["advisories"]["1500"]["package"],
        "yargs-parser"
    );
    assert!(result["stdout"].as_str().unwrap().contains("\"1500\""));
    assert!(result["logs"][0]
        .as_str()
        .unwrap()
        .contains("Audit reported 1 advisories (low: 1)"));
    assert!(!fx.calls().contains("install"));
    assert!(fx.lockfile().exists());
}

#[test]
fn unaccepted_advisory_fails() {
    let fx = Fixture::new()
        .with_lockfile()
        .npm("exit 99", &audit_findings())
        .config(" []");

    let json = fx.run_json(1);

    assert_eq!(json["results"]["npm"]["status"]["status"], "failed");
    assert_eq!(
        json["results"]["npm"]["status"]["responsible"],
        serde_json::json!(["1500"])
    );
}

#[test]
fn malformed_exception_still_suppresses() {
    let fx = Fixture::new()
        .with_lockfile()
        .npm("exit 99", &audit_findings())
        .config("\n      - advisory_id: \"1500\"\n        notes: accepted");

    let json = fx.run_json(0);
    let result = &json["results"]["npm"];

    assert_eq!(result["status"]["status"], "passed");
    let errors = result["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().contains("changed_by"));
}

#[test]
fn resolver_failure_stops_before_audit() {
    let fx = Fixture::new()
        .npm("echo 'npm ERR! code ERESOLVE' >&2\nexit 1", AUDIT_CLEAN)
        .config(" []");

    let json = fx.run_json(2);
    let status = &json["results"]["npm"]["status"];

    assert_eq!(status["status"], "errored");
    assert_eq!(status["kind"], "resolver_failure");
    assert!(status["message"].as_str().unwrap().contains("ERESOLVE"));
    assert!(!fx.calls().contains("audit"));
}

#[test]
fn malformed_audit_output_is_an_error_and_cleans_up() {
    let fx = Fixture::new()
        .npm(INSTALL_OK, "echo 'npm ERR! network timeout'\nexit 1")
        .config(" []");

    let json = fx.run_json(2);

    assert_eq!(json["results"]["npm"]["status"]["kind"], "malformed_output");
    assert!(!fx.lockfile().exists());
}

#[test]
fn generated_lockfile_removed_after_failure() {
    let fx = Fixture::new().npm(INSTALL_OK, &audit_findings()).config(" []");

    fx.run_json(1);

    assert!(!fx.lockfile().exists());
}

#[test]
fn not_applicable_without_dependency_files() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("auditgate")
        .unwrap()
        .args(["check", "--path"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("nothing to audit"))
        .stdout(contains("npm_audit: no npm dependency files found, skipped"));
}

#[test]
fn human_report_lists_unaccepted_advisories() {
    let fx = Fixture::new()
        .with_lockfile()
        .npm("exit 99", &audit_findings())
        .config(" []");

    Command::cargo_bin("auditgate")
        .unwrap()
        .env("NO_COLOR", "1")
        .args(["check", "--path"])
        .arg(fx.root())
        .assert()
        .code(1)
        .stdout(contains("Unaccepted advisories: 1500"))
        .stdout(contains("[1500] yargs-parser (low)"));
}

#[test]
fn missing_path_is_rejected() {
    Command::cargo_bin("auditgate")
        .unwrap()
        .args(["check", "--path", "/definitely/not/here"])
        .assert()
        .failure()
        .stderr(contains("Path does not exist"));
}

#[test]
fn invalid_config_is_rejected() {
    let fx = Fixture::new();
    fs::write(fx.root().join("auditgate.yaml"), "ecosystems:\n  npm:\n    timeout_secs: 0\n").unwrap();

    fx.check().assert().failure().stderr(contains("timeout_secs"));
}
