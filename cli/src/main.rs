mod commands;
mod display;
mod logging;
mod scan;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "auditgate")]
#[command(about = "Fail builds on unaccepted dependency advisories", long_about = None)]
struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    #[command(about = "Audit the project's dependencies")]
    Check(commands::Check),

    #[command(about = "List supported ecosystems")]
    Ecosystems(commands::Ecosystems),

    #[command(about = "Print the JSON Schema of the config file")]
    Schema(commands::Schema),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Check(cmd) => {
            let code = cmd.run().await?;
            std::process::exit(code);
        }
        Commands::Ecosystems(cmd) => {
            cmd.run();
        }
        Commands::Schema(cmd) => {
            cmd.run()?;
        }
    }

    Ok(())
}
