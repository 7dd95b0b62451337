use crate::config::{Config, ScanContext};
use crate::error::{AuditError, Result};
use crate::exceptions::ExceptionSet;
use crate::manifest::ensure_manifest;
use crate::plugin::{AuditBackend, PluginRegistry};
use crate::report::{Reporter, ScanReport, ScannerResult};
use crate::types::AuditReport;
use crate::verdict::Verdict;
use std::path::PathBuf;
use std::time::Instant;

/// Run one audit: ensure the manifest, audit, parse, apply exceptions.
///
/// Resolver and parse failures come back as errors. A generated manifest is
/// removed before this returns, whichever way it returns.
pub async fn run_audit(
    backend: &dyn AuditBackend,
    ctx: &ScanContext,
    reporter: &mut dyn Reporter,
) -> Result<Verdict> {
    let manifest = ensure_manifest(backend, ctx, reporter).await?;
    tracing::debug!(
        manifest = %manifest.path().display(),
        generated = manifest.is_generated(),
        "manifest ready"
    );

    let output = backend.audit(ctx).await?;

    // Exceptions are not consulted when the audit itself found nothing.
    if output.success() {
        return Ok(Verdict::Pass);
    }

    let report = backend.parse(&output.stdout)?;
    reporter.report_stdout(&output.stdout);

    let structured = serde_json::to_value(&report).map_err(|e| AuditError::MalformedOutput {
        message: e.to_string(),
    })?;
    reporter.report_info(&format!("{}_audit_output", backend.ecosystem()), structured);
    reporter.log(&severity_summary(&report));

    let exceptions = ExceptionSet::from_config(ctx.exceptions.as_deref());
    for entry in exceptions.invalid() {
        if let Some(message) = entry.error_message() {
            reporter.report_error(&message);
        }
    }
    for entry in exceptions.entries() {
        reporter.report_info("exceptions", entry.raw.clone());
    }

    Ok(Verdict::decide(
        report.advisory_ids(),
        &exceptions.suppressed_ids(),
    ))
}

fn severity_summary(report: &AuditReport) -> String {
    let counts = report
        .count_by_severity()
        .iter()
        .rev()
        .map(|(severity, count)| format!("{}: {}", severity, count))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Audit reported {} advisories ({})", report.advisories.len(), counts)
}

pub struct Scanner<'a> {
    registry: &'a PluginRegistry,
    config: &'a Config,
}

impl<'a> Scanner<'a> {
    pub fn new(registry: &'a PluginRegistry, config: &'a Config) -> Self {
        Self { registry, config }
    }

    pub async fn scan(&self, path: PathBuf) -> Result<ScanReport> {
        let start = Instant::now();
        let mut report = ScanReport::new(path.clone());

        for (name, detector, backend) in self.registry.iter() {
            let ecosystem = backend.ecosystem();
            let files = detector.detect(&path).await?;

            if files.is_empty() {
                tracing::info!(scanner = name, "no dependency files found, skipping");
                report
                    .warnings
                    .push(format!("{}: no {} dependency files found, skipped", name, ecosystem));
                continue;
            }

            let ctx = ScanContext::from_config(path.clone(), &self.config.ecosystem(ecosystem));
            let mut result = ScannerResult::new(name);

            match run_audit(backend, &ctx, &mut result).await {
                Ok(verdict) => result.report_verdict(&verdict),
                Err(e) => result.report_run_error(&e),
            }

            report.add_result(ecosystem, result);
        }

        report.elapsed = start.elapsed().as_millis() as u64;

        Ok(report)
    }
}

pub async fn scan_path(
    path: PathBuf,
    registry: &PluginRegistry,
    config: &Config,
) -> Result<ScanReport> {
    if !path.is_dir() {
        return Err(AuditError::InvalidDirectory {
            path: path.display().to_string(),
            reason: "not a directory".to_string(),
        });
    }

    let scanner = Scanner::new(registry, config);
    scanner.scan(path).await
}
