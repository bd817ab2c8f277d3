//! Attrangi - terminal client for the Attrangi support assistant
//!
#![doc = "Main entry point for the Attrangi chat client."]

use anyhow::Result;

use attrangi::cli::{Cli, Commands};
use attrangi::commands;
use attrangi::config::Config;
use attrangi::logging::{init_logging, with_bootstrap_logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration; diagnostics go to a bootstrap subscriber until
    // the configured one is installed
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = with_bootstrap_logging(cli.verbose, || Config::load(config_path, &cli))?;

    init_logging(&config.logging)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat => {
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Send { message } => {
            tracing::info!("Sending one-shot message");
            commands::oneshot::run_send(config, message).await?;
            Ok(())
        }
        Commands::Summary => {
            tracing::info!("Requesting conversation summary");
            commands::oneshot::run_summary(config).await?;
            Ok(())
        }
        Commands::Reset => {
            tracing::info!("Resetting conversation");
            commands::oneshot::run_reset(config).await?;
            Ok(())
        }
        Commands::Session { command } => {
            commands::session::run_session(config, command)?;
            Ok(())
        }
    }
}
