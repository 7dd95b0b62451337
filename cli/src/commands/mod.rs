use auditgate_core::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
pub struct Check {
    #[arg(short, long, help = "Project root to audit")]
    path: Option<PathBuf>,
    #[arg(short, long, help = "Config file (defaults to auditgate.yaml in the project root)")]
    config: Option<PathBuf>,
    #[arg(short, long, help = "Output in JSON format")]
    json: bool,
}

impl Check {
    /// Returns the process exit code.
    pub async fn run(&self) -> anyhow::Result<i32> {
        let path = self.path.clone().unwrap_or_else(|| PathBuf::from("."));

        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }

        let config = Config::discover(&path, self.config.as_deref())?;
        tracing::debug!(
            path = %path.display(),
            config = ?self.config,
            ecosystems = config.ecosystems.len(),
            "loaded configuration"
        );

        let report = super::scan::run_scan(&path, &config).await?;
        let code = report.exit_code();
        tracing::info!(code, elapsed_ms = report.elapsed, "check finished");

        if self.json {
            println!("{}", super::display::print_json(&report)?);
        } else {
            super::display::print_report(&report);
        }

        Ok(code)
    }
}

#[derive(Parser)]
pub struct Ecosystems;

impl Ecosystems {
    pub fn run(&self) {
        let registry = super::scan::build_registry(&Config::default());
        println!("Supported ecosystems:");
        for ecosystem in registry.ecosystems() {
            println!("  - {}", ecosystem);
        }
    }
}

#[derive(Parser)]
pub struct Schema;

impl Schema {
    pub fn run(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(&Config::json_schema())?);
        Ok(())
    }
}
