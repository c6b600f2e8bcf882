//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use veil_core::EnumValueNumbering;

/// Veil - anonymize Prisma schemas for sharing
#[derive(Parser, Debug)]
#[command(name = "veil")]
#[command(version)]
#[command(about = "Veil - anonymize Prisma schemas for sharing", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Obfuscate a schema file
    Obfuscate(ObfuscateArgs),

    /// Display version information
    Version,
}

/// Arguments for the `obfuscate` command
#[derive(Args, Debug)]
pub struct ObfuscateArgs {
    /// Schema file to read
    pub input: PathBuf,

    /// File to write the obfuscated schema to (defaults to stdout)
    pub output: Option<PathBuf>,

    /// Path to a veil.toml configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the original-to-synthetic name mapping as JSON to this file
    #[arg(short, long)]
    pub mapping: Option<PathBuf>,

    /// How enum values are numbered (overrides the configuration file)
    #[arg(long, value_enum)]
    pub enum_values: Option<Numbering>,
}

/// Enum value numbering schemes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    /// Restart at VALUE_0 for every enum
    PerEnum,
    /// Count across all enums of the schema
    Global,
}

impl From<Numbering> for EnumValueNumbering {
    fn from(numbering: Numbering) -> Self {
        match numbering {
            Numbering::PerEnum => EnumValueNumbering::PerEnum,
            Numbering::Global => EnumValueNumbering::Global,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_obfuscate_args() {
        let cli = Cli::try_parse_from([
            "veil",
            "obfuscate",
            "schema.prisma",
            "out.prisma",
            "--mapping",
            "names.json",
            "--enum-values",
            "global",
        ])
        .unwrap();

        match cli.command {
            Command::Obfuscate(args) => {
                assert_eq!(args.input, PathBuf::from("schema.prisma"));
                assert_eq!(args.output, Some(PathBuf::from("out.prisma")));
                assert_eq!(args.mapping, Some(PathBuf::from("names.json")));
                assert_eq!(args.enum_values, Some(Numbering::Global));
                assert!(args.config.is_none());
            }
            other => panic!("Expected obfuscate, got {:?}", other),
        }
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["veil", "obfuscate"]).is_err());
    }

    #[test]
    fn test_numbering_conversion() {
        assert_eq!(
            EnumValueNumbering::from(Numbering::PerEnum),
            EnumValueNumbering::PerEnum
        );
        assert_eq!(
            EnumValueNumbering::from(Numbering::Global),
            EnumValueNumbering::Global
        );
    }
}
