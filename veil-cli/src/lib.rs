//! Veil CLI - Command-line interface for the veil schema obfuscator.
//!
//! Reads a Prisma schema, anonymizes every user-chosen identifier and writes
//! the result to stdout or a file.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
