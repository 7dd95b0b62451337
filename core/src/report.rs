use crate::error::AuditError;
use crate::types::Ecosystem;
use crate::verdict::Verdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Observation sink for a single scanner run. Never influences the verdict.
pub trait Reporter {
    fn log(&mut self, message: &str);
    fn report_stdout(&mut self, stdout: &str);
    fn report_info(&mut self, kind: &str, value: Value);
    fn report_error(&mut self, message: &str);
    fn report_verdict(&mut self, verdict: &Verdict);
    fn report_run_error(&mut self, error: &AuditError);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    NotRun,
    Passed,
    Failed {
        responsible: Vec<String>,
    },
    Errored {
        kind: String,
        message: String,
    },
}

impl RunStatus {
    /// `NotRun` counts as passing: the check was not applicable.
    pub fn is_pass(&self) -> bool {
        matches!(self, RunStatus::NotRun | RunStatus::Passed)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RunStatus::Errored { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerResult {
    pub scanner: String,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    pub info: BTreeMap<String, Vec<Value>>,
    pub errors: Vec<String>,
    pub logs: Vec<String>,
}

impl ScannerResult {
    pub fn new(scanner: impl Into<String>) -> Self {
        Self {
            scanner: scanner.into(),
            status: RunStatus::NotRun,
            stdout: None,
            info: BTreeMap::new(),
            errors: Vec::new(),
            logs: Vec::new(),
        }
    }

    pub fn info(&self, kind: &str) -> &[Value] {
        self.info.get(kind).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Reporter for ScannerResult {
    fn log(&mut self, message: &str) {
        tracing::info!(scanner = %self.scanner, "{}", message);
        self.logs.push(message.to_string());
    }

    fn report_stdout(&mut self, stdout: &str) {
        tracing::debug!(scanner = %self.scanner, bytes = stdout.len(), "captured audit output");
        self.stdout = Some(stdout.to_string());
    }

    fn report_info(&mut self, kind: &str, value: Value) {
        tracing::debug!(scanner = %self.scanner, kind, "info record");
        self.info.entry(kind.to_string()).or_default().push(value);
    }

    fn report_error(&mut self, message: &str) {
        tracing::warn!(scanner = %self.scanner, "{}", message);
        self.errors.push(message.to_string());
    }

    fn report_verdict(&mut self, verdict: &Verdict) {
        self.status = match verdict {
            Verdict::Pass => RunStatus::Passed,
            Verdict::Fail { responsible } => RunStatus::Failed {
                responsible: responsible.iter().cloned().collect(),
            },
        };
        tracing::info!(scanner = %self.scanner, status = ?self.status, "verdict");
    }

    fn report_run_error(&mut self, error: &AuditError) {
        tracing::error!(scanner = %self.scanner, kind = error.kind(), "{}", error);
        self.errors.push(error.to_string());
        self.status = RunStatus::Errored {
            kind: error.kind().to_string(),
            message: error.to_string(),
        };
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub timestamp: DateTime<Utc>,

    pub scanned_path: PathBuf,

    pub elapsed: u64,

    pub results: BTreeMap<Ecosystem, ScannerResult>,

    pub warnings: Vec<String>,
}

impl ScanReport {
    pub fn new(scanned_path: PathBuf) -> Self {
        Self {
            timestamp: Utc::now(),
            scanned_path,
            elapsed: 0,
            results: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_result(&mut self, ecosystem: Ecosystem, result: ScannerResult) {
        self.results.insert(ecosystem, result);
    }

    pub fn passed(&self) -> bool {
        self.results.values().all(|r| r.status.is_pass())
    }

    pub fn has_errors(&self) -> bool {
        self.results.values().any(|r| r.status.is_error())
    }

    /// 0 = pass, 1 = unresolved advisories, 2 = the run itself failed.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            2
        } else if self.passed() {
            0
        } else {
            1
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    #[test]
    fn test_verdict_sets_status() {
        let mut result = ScannerResult::new("npm_audit");
        let responsible: BTreeSet<String> = ["2".to_string(), "1".to_string()].into();
        result.report_verdict(&Verdict::Fail { responsible });

        assert_eq!(
            result.status,
            RunStatus::Failed {
                responsible: vec!["1".to_string(), "2".to_string()]
            }
        );
    }

    #[test]
    fn test_run_error_is_distinguishable() {
        let mut result = ScannerResult::new("npm_audit");
        result.report_run_error(&AuditError::MalformedOutput {
            message: "expected value".to_string(),
        });

        match &result.status {
            RunStatus::Errored { kind, .. } => assert_eq!(kind, "malformed_output"),
            other => panic!("unexpected status: {other:?}"),
        }
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_info_records_accumulate() {
        let mut result = ScannerResult::new("npm_audit");
        result.report_info("exceptions", json!({"advisory_id": "1"}));
        result.report_info("exceptions", json!({"advisory_id": "2"}));

        assert_eq!(result.info("exceptions").len(), 2);
        assert!(result.info("npm_audit_output").is_empty());
    }

    #[test]
    fn test_exit_codes() {
        let mut report = ScanReport::new(PathBuf::from("."));
        assert_eq!(report.exit_code(), 0);

        let mut failed = ScannerResult::new("npm_audit");
        failed.report_verdict(&Verdict::Fail {
            responsible: ["9".to_string()].into(),
        });
        report.add_result(Ecosystem::Npm, failed);
        assert_eq!(report.exit_code(), 1);

        let mut errored = ScannerResult::new("npm_audit");
        errored.report_run_error(&AuditError::ResolverFailure {
            stderr: "ERESOLVE".to_string(),
        });
        report.add_result(Ecosystem::Npm, errored);
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn test_report_json_shape() {
        let mut report = ScanReport::new(PathBuf::from("/project"));
        let mut result = ScannerResult::new("npm_audit");
        result.report_verdict(&Verdict::Pass);
        report.add_result(Ecosystem::Npm, result);

        let json: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["results"]["npm"]["status"]["status"], "passed");
    }
}
