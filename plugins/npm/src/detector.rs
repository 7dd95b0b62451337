use auditgate_core::plugin::Detector;
use auditgate_core::types::{DependencyFile, DependencyFileKind, Ecosystem};
use auditgate_core::Result;
use std::path::Path;

pub const PACKAGE_JSON: &str = "package.json";
pub const PACKAGE_LOCK: &str = "package-lock.json";
pub const YARN_LOCK: &str = "yarn.lock";

/// Files whose presence in the project root enables the npm audit.
const ROOT_FILES: [(&str, DependencyFileKind); 3] = [
    (PACKAGE_JSON, DependencyFileKind::Declaration),
    (PACKAGE_LOCK, DependencyFileKind::Lockfile),
    (YARN_LOCK, DependencyFileKind::Lockfile),
];

pub struct NpmDetector;

impl NpmDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NpmDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Detector for NpmDetector {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    async fn detect(&self, path: &Path) -> Result<Vec<DependencyFile>> {
        // Only the project root counts; nested packages (node_modules, workspaces)
        // are covered by the root lockfile.
        let files = ROOT_FILES
            .iter()
            .map(|(name, kind)| (path.join(name), *kind))
            .filter(|(file_path, _)| file_path.is_file())
            .map(|(file_path, kind)| DependencyFile {
                ecosystem: Ecosystem::Npm,
                kind,
                path: file_path,
            })
            .collect();

        Ok(files)
    }
}
