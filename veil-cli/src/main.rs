//! Veil CLI - Command-line interface for the veil schema obfuscator.

use clap::Parser;

use veil_cli::cli::{Cli, Command};
use veil_cli::commands;
use veil_cli::error::CliResult;
use veil_cli::logging;
use veil_cli::output;

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Obfuscate(args) => commands::obfuscate::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
