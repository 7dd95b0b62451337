use crate::backend::NpmAuditBackend;
use crate::detector::NpmDetector;
use auditgate_core::types::Ecosystem;
use auditgate_core::{AuditBackend, Detector, EcosystemConfig, Plugin};

pub struct NpmPlugin {
    config: EcosystemConfig,
}

impl NpmPlugin {
    pub fn new() -> Self {
        Self {
            config: EcosystemConfig::default(),
        }
    }

    pub fn with_config(config: EcosystemConfig) -> Self {
        Self { config }
    }
}

impl Default for NpmPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for NpmPlugin {
    fn name(&self) -> &'static str {
        "npm_audit"
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn create_detector(&self) -> Option<Box<dyn Detector>> {
        Some(Box::new(NpmDetector::new()))
    }

    fn create_backend(&self) -> Option<Box<dyn AuditBackend>> {
        let backend = match &self.config.binary {
            Some(binary) => NpmAuditBackend::new().with_binary(binary.clone()),
            None => NpmAuditBackend::new(),
        };
        Some(Box::new(backend))
    }
}
