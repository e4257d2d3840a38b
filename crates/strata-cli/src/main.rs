//! # strata-cli
//!
//! Command-line front end for the Strata versioned asset store.
//!
//! This is the main entry point for the `strata` binary. It handles command
//! parsing, sets up logging, and dispatches to the command handlers on a
//! Tokio runtime.

use clap::{Parser, Subcommand};
use tracing::info;

mod commands;

use commands::CommandContext;

/// Versioned, content-addressed asset store
#[derive(Parser)]
#[command(name = "strata", version, about = "Versioned asset store with draft/live serving")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a request path and report verdict and response status
    Resolve {
        /// Request path, e.g. docs/0123456789/guide.txt
        path: String,
        /// Treat the request as authenticated
        #[arg(long)]
        authenticated: bool,
        /// Session grant; repeatable
        #[arg(long, value_name = "FILE=HASH")]
        grant: Vec<String>,
    },
    /// Print the canonical storage key for a file version
    Key {
        filename: String,
        hash: String,
        #[arg(long)]
        variant: Option<String>,
    },
    /// Maintain the version catalog and the store trees
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Record a new draft version from a local file
    Add {
        filename: String,
        file: camino::Utf8PathBuf,
    },
    /// Publish the newest draft version to the live stage
    Publish { filename: String },
    /// Retire the live version, keeping its history
    Unpublish { filename: String },
    /// Remove a file, its history, and its blobs
    Archive { filename: String },
    /// List catalog records
    List {
        filename: Option<String>,
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    info!("Starting Strata CLI v{}", env!("CARGO_PKG_VERSION"));

    run_cli(cli)
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let ctx = CommandContext::new().await?;
        commands::dispatch_command(cli.command, &ctx).await?;
        Ok(())
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "strata={level},strata_resolver={level},strata_store={level},strata_catalog={level}"
        ))
        .with_target(false)
        .init();
}
