//! texpilot - prompt-to-LaTeX relay
//!
//! Main entry point for the texpilot CLI.

mod cli;
mod server;

use clap::Parser;
use tracing::{error, info, warn};

use texpilot_config::{ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};
use crate::server::{BoxError, init_tracing, run_relay};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();

    // Before config so `${VAR}` expansion and the credential can see it.
    let dotenv = dotenvy::dotenv();

    let config = ConfigLoader::load_or_default(&cli.config)?;
    init_tracing(&config.logging)?;

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to load .env: {}", e),
    }

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        for err in &validation.errors {
            error!("Config {}: {}", err.path, err.message);
        }
        return Err(format!("invalid configuration in {}", cli.config.display()).into());
    }

    match cli.command {
        None | Some(Commands::Run) => run_relay(&config).await,
    }
}
