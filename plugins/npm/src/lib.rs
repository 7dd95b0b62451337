pub mod backend;
pub mod detector;
pub mod parser;
pub mod plugin;

pub use backend::NpmAuditBackend;
pub use detector::NpmDetector;
pub use plugin::NpmPlugin;
