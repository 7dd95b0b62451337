use crate::detector::PACKAGE_LOCK;
use auditgate_core::plugin::AuditBackend;
use auditgate_core::process::{run_command, CommandOutput};
use auditgate_core::types::{AuditReport, Ecosystem};
use auditgate_core::{Result, ScanContext};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

const RESOLVE_ARGS: [&str; 2] = ["install", "--package-lock-only"];
const AUDIT_ARGS: [&str; 2] = ["audit", "--json"];

/// Runs `npm` against the project root.
pub struct NpmAuditBackend {
    binary: PathBuf,
}

impl NpmAuditBackend {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("npm"),
        }
    }

    pub fn with_binary(mut self, binary: PathBuf) -> Self {
        self.binary = binary;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for NpmAuditBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditBackend for NpmAuditBackend {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn manifest_name(&self) -> &'static str {
        PACKAGE_LOCK
    }

    async fn resolve(&self, ctx: &ScanContext) -> Result<CommandOutput> {
        run_command(&self.binary, &RESOLVE_ARGS, &ctx.root, ctx.timeout).await
    }

    async fn audit(&self, ctx: &ScanContext) -> Result<CommandOutput> {
        run_command(&self.binary, &AUDIT_ARGS, &ctx.root, ctx.timeout).await
    }

    fn parse(&self, stdout: &str) -> Result<AuditReport> {
        crate::parser::parse_audit_output(stdout)
    }
}
