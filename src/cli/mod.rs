//! CLI module - Command-line interface for pixrelay
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};

/// pixrelay - Image search abstraction layer
/// Relays image searches to Pixabay and remembers recent queries
#[derive(Parser)]
#[command(name = "pixrelay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[command(alias = "s")]
    Serve,

    /// Print the most recent search terms
    #[command(alias = "r")]
    Recent,

    /// Write a default config.toml if none exists
    InitConfig,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
