use crate::error::{AuditError, Result};
use crate::types::Ecosystem;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "auditgate.yaml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub ecosystems: BTreeMap<Ecosystem, EcosystemConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EcosystemConfig {
    /// Program used for dependency resolution and auditing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<PathBuf>,

    /// Upper bound for each external command, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Accepted advisories. Entries are kept untyped so malformed ones can be
    /// reported instead of rejected at load time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceptions: Option<Vec<serde_json::Value>>,
}

impl EcosystemConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

impl Config {
    /// Load the config for a project.
    ///
    /// An explicit path must exist. Without one, `auditgate.yaml` in the
    /// project root is used when present, otherwise the defaults apply.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AuditError::ConfigNotFound(path.to_path_buf()));
                }
                Self::from_file(path)
            }
            None => {
                let path = root.join(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content, path)
    }

    pub fn from_yaml(content: &str, file: &Path) -> Result<Self> {
        // An empty document is an empty config, not a syntax error.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(content).map_err(|e| match e.location() {
            Some(location) => AuditError::YamlSyntaxError {
                file: file.to_path_buf(),
                line: location.line(),
                column: location.column(),
                message: e.to_string(),
            },
            None => AuditError::Config {
                message: e.to_string(),
            },
        })?;

        config.validate(file)?;
        Ok(config)
    }

    fn validate(&self, file: &Path) -> Result<()> {
        let mut errors = Vec::new();

        for (ecosystem, settings) in &self.ecosystems {
            if settings.timeout_secs == Some(0) {
                errors.push(format!("ecosystems.{}.timeout_secs must be greater than 0", ecosystem));
            }
            if let Some(binary) = &settings.binary {
                if binary.as_os_str().is_empty() {
                    errors.push(format!("ecosystems.{}.binary must not be empty", ecosystem));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AuditError::Validation {
                file: file.to_path_buf(),
                errors,
            })
        }
    }

    pub fn ecosystem(&self, ecosystem: Ecosystem) -> EcosystemConfig {
        self.ecosystems.get(&ecosystem).cloned().unwrap_or_default()
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Config)
    }
}

/// Immutable input to one audit run.
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub root: PathBuf,
    pub exceptions: Option<Vec<serde_json::Value>>,
    pub timeout: Duration,
}

impl ScanContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exceptions: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &EcosystemConfig) -> Self {
        Self {
            root: root.into(),
            exceptions: config.exceptions.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn with_exceptions(mut self, exceptions: Vec<serde_json::Value>) -> Self {
        self.exceptions = Some(exceptions);
        self
    }
}
