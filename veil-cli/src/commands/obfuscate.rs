//! `veil obfuscate` command - Anonymize a schema file.

use std::path::Path;

use tokio::io::AsyncWriteExt;
use tracing::debug;

use veil_core::{Obfuscation, Obfuscator};

use crate::cli::ObfuscateArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the obfuscate command
pub async fn run(args: ObfuscateArgs) -> CliResult<()> {
    if !args.input.exists() {
        return Err(CliError::Input(format!(
            "Input file {} does not exist",
            args.input.display()
        )));
    }

    let config = Config::discover(args.config.as_deref())?;
    let mut options = config.obfuscation;
    if let Some(numbering) = args.enum_values {
        options.enum_values = numbering.into();
    }
    debug!(enum_values = %options.enum_values, "Resolved obfuscation options");

    if args.output.is_some() {
        output::info(&format!("Reading {}", args.input.display()));
    }
    let text = tokio::fs::read_to_string(&args.input).await?;

    let result = Obfuscator::new(options).run(&text)?;

    if let Some(path) = &args.mapping {
        write_mapping(path, &result).await?;
        output::info(&format!("Wrote name mapping to {}", path.display()));
    }

    match &args.output {
        Some(path) => {
            if path.exists() {
                output::warn(&format!("Overwriting {}", path.display()));
            }
            tokio::fs::write(path, &result.output).await?;
            output::success(&format!("Wrote to {}", path.display()));
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(result.output.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}

async fn write_mapping(path: &Path, result: &Obfuscation) -> CliResult<()> {
    let json = serde_json::to_string_pretty(&result.registry.mapping())?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
