//! PDF Digest CLI
//!
//! Serve the HTTP API, or run the extraction/summarization pipeline on a
//! local PDF without a server.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pdfdigest_core::Config;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// PDF Digest - extract and summarize PDF documents
#[derive(Parser)]
#[command(name = "pdfdigest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(long, global = true, env = "PDFDIGEST_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "PDFDIGEST_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve,

    /// Extract text from a local PDF and print the result
    Extract {
        /// Path to the PDF file
        file: PathBuf,

        /// Print the full text bundle as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a local PDF
    Summarize {
        /// Path to the PDF file
        file: PathBuf,

        /// Summary mode: short, medium or detailed
        #[arg(short, long, default_value = "medium")]
        mode: String,
    },

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Initialize default configuration
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let mut config = if let Some(path) = &cli.config {
        Config::load_from_file(path)?
    } else {
        Config::load().unwrap_or_default()
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }

    match cli.command {
        Commands::Serve => commands::serve::run(config).await,
        Commands::Extract { file, json } => commands::extract::run(file, json),
        Commands::Summarize { file, mode } => {
            commands::summarize::run(config, file, mode).await
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(config),
            ConfigCommands::Init { force } => commands::config::init(force),
        },
    }
}
