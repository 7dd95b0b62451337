//! Auditgate Core Library
//!
//! Core types, traits and the decision pipeline for the Auditgate
//! dependency audit check.

pub mod types;
pub mod plugin;
pub mod error;
pub mod config;
pub mod exceptions;
pub mod manifest;
pub mod process;
pub mod verdict;
pub mod report;
pub mod scanner;

pub use types::*;
pub use error::{AuditError, ExceptionFormatError, Result};
pub use plugin::{AuditBackend, Detector, Plugin, PluginRegistry};
pub use config::{Config, EcosystemConfig, ScanContext};
pub use exceptions::{ExceptionEntry, ExceptionSet};
pub use manifest::{ensure_manifest, ManifestGuard};
pub use process::{run_command, CommandOutput};
pub use verdict::Verdict;
pub use report::{Reporter, RunStatus, ScanReport, ScannerResult};
pub use scanner::{run_audit, scan_path, Scanner};
