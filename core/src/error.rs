use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Dependency resolver failed to produce a lockfile:\n{stderr}")]
    ResolverFailure { stderr: String },

    #[error("Audit output could not be parsed: {message}")]
    MalformedOutput { message: String },

    #[error("Failed to run '{program}': {message}")]
    Process { program: String, message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error in config file '{file}':\n{}", .errors.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation { file: PathBuf, errors: Vec<String> },

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid YAML syntax in '{}' at line {line}, column {column}: {message}", .file.display())]
    YamlSyntaxError {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unknown ecosystem '{ecosystem}'. Supported ecosystems: {supported}")]
    UnknownEcosystem {
        ecosystem: String,
        supported: String,
    },

    #[error("Invalid directory path '{path}': {reason}")]
    InvalidDirectory { path: String, reason: String },

    #[error("Plugin error: {message}")]
    Plugin { message: String },
}

impl AuditError {
    /// Stable machine-readable name for the error, used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            AuditError::ResolverFailure { .. } => "resolver_failure",
            AuditError::MalformedOutput { .. } => "malformed_output",
            AuditError::Process { .. } => "process",
            AuditError::Io { .. } => "io",
            AuditError::Config { .. }
            | AuditError::Validation { .. }
            | AuditError::ConfigNotFound(_)
            | AuditError::YamlSyntaxError { .. }
            | AuditError::UnknownEcosystem { .. } => "config",
            AuditError::InvalidDirectory { .. } => "invalid_directory",
            AuditError::Plugin { .. } => "plugin",
        }
    }
}

/// Problem with the shape of a single configured exception entry.
///
/// These never abort a run; they are surfaced through the reporter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExceptionFormatError {
    #[error("exception must be a mapping with `advisory_id`, `changed_by` and `notes`")]
    NotAMapping,

    #[error("exception is missing field(s): {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("exception has unexpected field(s): {}", .0.join(", "))]
    UnexpectedFields(Vec<String>),

    #[error("exception is missing field(s): {}; unexpected field(s): {}", .missing.join(", "), .unexpected.join(", "))]
    MismatchedFields {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, AuditError>;
