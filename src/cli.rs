//! CLI definitions for texpilot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// texpilot CLI.
#[derive(Parser)]
#[command(name = "texpilot")]
#[command(about = "Prompt-to-LaTeX relay for the editor extension")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "texpilot.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the relay server in foreground (default)
    Run,
}
