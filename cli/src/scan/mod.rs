use anyhow::Result;
use auditgate_core::{scan_path, Config, PluginRegistry, ScanReport};
use std::path::Path;

#[cfg(feature = "npm")]
use auditgate_core::Ecosystem;
#[cfg(feature = "npm")]
use auditgate_plugin_npm::NpmPlugin;

/// Registry of every plugin compiled into this binary.
pub fn build_registry(config: &Config) -> PluginRegistry {
    #[allow(unused_mut)]
    let mut registry = PluginRegistry::new();

    #[cfg(feature = "npm")]
    {
        registry.register_plugin(NpmPlugin::with_config(config.ecosystem(Ecosystem::Npm)));
    }
    #[cfg(not(feature = "npm"))]
    let _ = config;

    registry
}

pub async fn run_scan(path: &Path, config: &Config) -> Result<ScanReport> {
    let registry = build_registry(config);
    let report = scan_path(path.to_path_buf(), &registry, config).await?;
    Ok(report)
}
