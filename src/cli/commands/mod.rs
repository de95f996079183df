//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod config_cmd;
mod enrich;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, LoadOptions};

#[derive(Parser)]
#[command(name = "enrich-snippet")]
#[command(about = "Search indexer web API skill that prepends page references to snippets")]
#[command(version)]
pub struct Cli {
    /// Config file path (TOML)
    #[arg(short, long, global = true, env = "ENRICH_SNIPPET_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Bind address: port, host, or host:port
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Enrich a request envelope offline and print the response
    Enrich {
        /// JSON file with a `{"values": [...]}` envelope (reads stdin if omitted)
        file: Option<PathBuf>,
        /// Pretty-print the response
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show the effective configuration
    Config,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let bind = match &cli.command {
        Commands::Serve { bind } => bind.clone(),
        _ => None,
    };
    let options = LoadOptions {
        config_path: cli.config,
        bind,
    };
    let settings = load_settings(&options).await?;

    match cli.command {
        Commands::Serve { .. } => serve::cmd_serve(&settings).await,
        Commands::Enrich { file, pretty } => enrich::cmd_enrich(file.as_deref(), pretty).await,
        Commands::Config => config_cmd::cmd_config_show(&settings),
    }
}
