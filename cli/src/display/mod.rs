use auditgate_core::{RunStatus, ScanReport};
use colored::Colorize;

pub fn print_report(report: &ScanReport) {
    println!("\n{}", "=".repeat(60));
    println!("Auditgate Report");
    println!("{}", "=".repeat(60));
    println!("Path: {}", report.scanned_path.display());
    println!("Duration: {}ms", report.elapsed);
    println!();

    if report.results.is_empty() {
        println!("No supported dependency files found; nothing to audit.");
        println!();
    }

    for (ecosystem, result) in &report.results {
        println!("{} ({})", result.scanner.bold(), ecosystem);

        match &result.status {
            RunStatus::NotRun => println!("  Status: {}", "not run".dimmed()),
            RunStatus::Passed => println!("  Status: {}", "passed".green()),
            RunStatus::Failed { responsible } => {
                println!("  Status: {}", "failed".red().bold());
                println!("  Unaccepted advisories: {}", responsible.join(", "));
            }
            RunStatus::Errored { kind, message } => {
                println!("  Status: {} ({})", "error".yellow().bold(), kind);
                println!("  {}", message);
            }
        }

        for advisory in result.info(&format!("{}_audit_output", ecosystem)) {
            if let Some(advisories) = advisory.get("advisories").and_then(|a| a.as_object()) {
                println!("  Advisories:");
                for (id, details) in advisories {
                    let package = details.get("package").and_then(|v| v.as_str()).unwrap_or("?");
                    let severity = details.get("severity").and_then(|v| v.as_str()).unwrap_or("unknown");
                    println!("    - [{}] {} ({})", id, package, severity);
                }
            }
        }

        let exceptions = result.info("exceptions");
        if !exceptions.is_empty() {
            println!("  Exceptions:");
            for exception in exceptions {
                println!("    - {}", exception);
            }
        }

        if !result.errors.is_empty() {
            println!("  Errors:");
            for error in &result.errors {
                println!("    - {}", error.yellow());
            }
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
        println!();
    }

    match report.exit_code() {
        0 => println!("{}", "No unaccepted advisories.".green()),
        1 => println!("{}", "Unaccepted advisories found!".red().bold()),
        _ => println!("{}", "Audit could not be completed.".yellow().bold()),
    }
}

pub fn print_json(report: &ScanReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
