//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod init;
mod seed;
mod serve;
mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions, DEFAULT_HOST, DEFAULT_PORT};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Server-rendered product catalog")]
#[command(version)]
pub struct Cli {
    /// Data directory or database file (overrides config file).
    /// Can be a directory containing storefront.db or a .db file directly.
    #[arg(long, short = 'd', global = true)]
    data: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check for the verbose flag before the parser runs.
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and database schema
    Init,

    /// Import a catalog file (JSON, TOML or YAML)
    Seed {
        /// Catalog file to import
        file: PathBuf,
    },

    /// Start the web server
    Serve {
        /// Address to bind: port, host, or host:port
        #[arg(long, short, env = "STOREFRONT_BIND")]
        bind: Option<String>,
    },

    /// Print the metadata and page outline for a category
    Show {
        /// Category slug, percent-encoded as it would appear in a URL
        category: String,
    },
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        data: cli.data,
    };
    let (settings, _config) = load_settings_with_options(options).await;
    tracing::debug!("Using database {}", settings.redacted_database_url());

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Seed { file } => seed::cmd_seed(&settings, &file).await,
        Commands::Serve { bind } => {
            let default_bind = format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT);
            let bind = bind
                .or_else(|| settings.bind.clone())
                .unwrap_or(default_bind);
            serve::cmd_serve(&settings, &bind).await
        }
        Commands::Show { category } => show::cmd_show(&settings, &category).await,
    }
}
