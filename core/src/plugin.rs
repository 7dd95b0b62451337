use crate::config::ScanContext;
use crate::error::Result;
use crate::process::CommandOutput;
use crate::types::{AuditReport, DependencyFile, Ecosystem};
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait Detector: Send + Sync {
    fn ecosystem(&self) -> Ecosystem;

    /// Dependency files in the project root that make the audit applicable.
    async fn detect(&self, path: &Path) -> Result<Vec<DependencyFile>>;
}

/// External tooling for one ecosystem: a lock-only resolver and an auditor.
#[async_trait]
pub trait AuditBackend: Send + Sync {
    fn ecosystem(&self) -> Ecosystem;

    /// File name of the resolved manifest in the project root.
    fn manifest_name(&self) -> &'static str;

    /// Write the resolved manifest without installing anything.
    async fn resolve(&self, ctx: &ScanContext) -> Result<CommandOutput>;

    /// Run the audit in structured-output mode.
    async fn audit(&self, ctx: &ScanContext) -> Result<CommandOutput>;

    /// Parse the audit output of a run that reported findings.
    fn parse(&self, stdout: &str) -> Result<AuditReport>;
}

pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;
    fn ecosystem(&self) -> Ecosystem;

    fn create_detector(&self) -> Option<Box<dyn Detector>> {
        None
    }
    fn create_backend(&self) -> Option<Box<dyn AuditBackend>> {
        None
    }
}

struct Registered {
    name: &'static str,
    detector: Box<dyn Detector>,
    backend: Box<dyn AuditBackend>,
}

pub struct PluginRegistry {
    plugins: Vec<Registered>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    pub fn register(
        &mut self,
        name: &'static str,
        detector: Box<dyn Detector>,
        backend: Box<dyn AuditBackend>,
    ) {
        self.plugins.push(Registered {
            name,
            detector,
            backend,
        });
    }

    /// Plugins missing a detector or a backend, or whose parts disagree on
    /// the ecosystem, are skipped.
    pub fn register_plugin<P: Plugin + 'static>(&mut self, plugin: P) -> bool {
        let ecosystem = plugin.ecosystem();
        match (plugin.create_detector(), plugin.create_backend()) {
            (Some(detector), Some(backend))
                if detector.ecosystem() == ecosystem && backend.ecosystem() == ecosystem =>
            {
                self.register(plugin.name(), detector, backend);
                true
            }
            (Some(_), Some(_)) => {
                tracing::warn!(plugin = plugin.name(), %ecosystem, "plugin parts disagree on ecosystem, skipping");
                false
            }
            _ => {
                tracing::warn!(plugin = plugin.name(), "plugin is incomplete, skipping");
                false
            }
        }
    }

    pub fn ecosystems(&self) -> Vec<Ecosystem> {
        self.plugins.iter().map(|p| p.backend.ecosystem()).collect()
    }

    pub(crate) fn iter(
        &self,
    ) -> impl Iterator<
        Item = (
            &'static str,
            &(dyn Detector + 'static),
            &(dyn AuditBackend + 'static),
        ),
    > + '_ {
        self.plugins
            .iter()
            .map(|p| (p.name, p.detector.as_ref(), p.backend.as_ref()))
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
