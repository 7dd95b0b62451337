use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Moderate,
    High,
    Critical,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub id: String,
    pub package: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerable_versions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patched_versions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Parsed result of one audit invocation.
///
/// Advisories are keyed by identifier, so identifiers are unique per report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub advisories: BTreeMap<String, Advisory>,
    #[serde(skip)]
    pub raw: String,
}

impl AuditReport {
    pub fn new(advisories: BTreeMap<String, Advisory>, raw: impl Into<String>) -> Self {
        Self {
            advisories,
            raw: raw.into(),
        }
    }

    pub fn advisory_ids(&self) -> impl Iterator<Item = &str> {
        self.advisories.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn count_by_severity(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for advisory in self.advisories.values() {
            *counts.entry(advisory.severity).or_insert(0) += 1;
        }
        counts
    }
}
