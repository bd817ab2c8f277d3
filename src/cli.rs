//! Command-line interface definition for Attrangi
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive chat and one-shot commands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Attrangi - a safe place to talk
///
/// Chat with the Attrangi assistant from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "attrangi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the assistant service base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Override the session database path
    #[arg(long)]
    pub session_db: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Attrangi
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive conversation
    Chat,

    /// Send a single message and print the reply
    Send {
        /// Message text
        #[arg(short, long)]
        message: String,
    },

    /// Print a summary of the conversation so far
    Summary,

    /// Clear the conversation on the service
    Reset,

    /// Inspect or replace the stored session id
    Session {
        /// Session subcommand
        #[command(subcommand)]
        command: SessionCommand,
    },
}

/// Session management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Print the session id, creating one if none is stored
    Show,

    /// Replace the stored session id with a new one
    New,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            api_url: None,
            session_db: None,
            json_logs: false,
            command: Commands::Chat,
        }
    }
}
