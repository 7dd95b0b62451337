use crate::config::ScanContext;
use crate::error::{AuditError, Result};
use crate::plugin::AuditBackend;
use crate::report::Reporter;
use std::path::{Path, PathBuf};

/// The resolved manifest used for an audit.
///
/// A manifest generated for this run is deleted when the guard is dropped,
/// so every exit path after generation cleans up. A pre-existing manifest is
/// never touched.
#[derive(Debug)]
pub struct ManifestGuard {
    path: PathBuf,
    generated: bool,
}

impl ManifestGuard {
    pub fn existing(path: PathBuf) -> Self {
        Self {
            path,
            generated: false,
        }
    }

    pub fn generated(path: PathBuf) -> Self {
        Self {
            path,
            generated: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }
}

impl Drop for ManifestGuard {
    fn drop(&mut self) {
        if !self.generated {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::info!(path = %self.path.display(), "removed generated manifest"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove generated manifest"
            ),
        }
    }
}

/// Make sure a resolved manifest exists in the project root.
pub async fn ensure_manifest(
    backend: &dyn AuditBackend,
    ctx: &ScanContext,
    reporter: &mut dyn Reporter,
) -> Result<ManifestGuard> {
    let path = ctx.root.join(backend.manifest_name());

    if path.exists() {
        return Ok(ManifestGuard::existing(path));
    }

    reporter.log(&format!(
        "Generating a temporary {}...",
        backend.manifest_name()
    ));

    let output = backend.resolve(ctx).await?;

    if !output.success() {
        reporter.log(&format!("STDERR:\n```\n{}\n```", output.stderr));
        return Err(AuditError::ResolverFailure {
            stderr: output.stderr,
        });
    }

    Ok(ManifestGuard::generated(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_manifest_removed_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("package-lock.json");
        std::fs::write(&path, "{}").unwrap();

        let guard = ManifestGuard::generated(path.clone());
        assert!(guard.is_generated());
        drop(guard);

        assert!(!path.exists());
    }

    #[test]
    fn test_existing_manifest_kept_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("package-lock.json");
        std::fs::write(&path, "{}").unwrap();

        drop(ManifestGuard::existing(path.clone()));

        assert!(path.exists());
    }

    #[test]
    fn test_missing_generated_manifest_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("package-lock.json");

        drop(ManifestGuard::generated(path.clone()));

        assert!(!path.exists());
    }
}
