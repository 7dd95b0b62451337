pub mod advisory;
pub mod dependency;
pub mod ecosystem;

pub use advisory::{Advisory, AuditReport, Severity};
pub use dependency::{DependencyFile, DependencyFileKind};
pub use ecosystem::Ecosystem;
