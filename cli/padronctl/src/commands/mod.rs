//! CLI commands.

mod import;
mod key;
mod rut;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// padron CLI - Validate RUTs and manage company keys.
#[derive(Debug, Parser)]
#[command(name = "padron")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Log level filter, overrides PADRON_LOG_LEVEL.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate RUTs and compute check digits.
    Rut(rut::RutCommand),

    /// Generate a company key.
    Key(key::KeyCommand),

    /// Load companies and workers from a JSON file.
    Import(import::ImportCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub async fn run(self, config: Config) -> Result<()> {
        let ctx = CommandContext {
            config,
            format: self.format,
        };

        match self.command {
            Commands::Rut(cmd) => cmd.run(&ctx),
            Commands::Key(cmd) => cmd.run(&ctx),
            Commands::Import(cmd) => cmd.run(&ctx).await,
            Commands::Version => {
                println!("padron {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}
