//! Schema for `npm audit --json` output (npm 6 report format).

use auditgate_core::types::{Advisory, AuditReport, Severity};
use auditgate_core::{AuditError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NpmAuditOutput {
    Report {
        advisories: BTreeMap<String, NpmAdvisory>,
    },
    Bare(BTreeMap<String, NpmAdvisory>),
}

#[derive(Debug, Deserialize)]
struct NpmAdvisory {
    module_name: String,
    severity: Severity,
    #[serde(default)]
    title: Option<String>,
    overview: String,
    #[serde(default)]
    vulnerable_versions: Option<String>,
    #[serde(default)]
    patched_versions: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl NpmAdvisory {
    // The mapping key is the identifier; the embedded numeric `id` is ignored.
    fn into_advisory(self, key: &str) -> Advisory {
        Advisory {
            id: key.to_string(),
            package: self.module_name,
            severity: self.severity,
            title: self.title,
            description: self.overview,
            vulnerable_versions: self.vulnerable_versions,
            patched_versions: self.patched_versions,
            url: self.url,
        }
    }
}

/// Parse audit output from a run that reported findings.
///
/// Anything other than an advisory mapping (including npm's own
/// `{"error": ...}` document) is malformed output, not a finding.
pub fn parse_audit_output(stdout: &str) -> Result<AuditReport> {
    let parsed: NpmAuditOutput =
        serde_json::from_str(stdout).map_err(|e| AuditError::MalformedOutput {
            message: format!("expected an npm audit report: {}", e),
        })?;

    let advisories = match parsed {
        NpmAuditOutput::Report { advisories } | NpmAuditOutput::Bare(advisories) => advisories,
    };

    let advisories = advisories
        .into_iter()
        .map(|(key, advisory)| {
            let advisory = advisory.into_advisory(&key);
            (key, advisory)
        })
        .collect();

    Ok(AuditReport::new(advisories, stdout))
}
