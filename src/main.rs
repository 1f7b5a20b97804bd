//! Entry point for the `onion-history` pipeline binary.
//!
//! Initializes tracing, parses the subcommand, and dispatches to the
//! matching pipeline step. All of the real work lives in the library's
//! `*_cmd` modules.

use clap::Parser;
use std::error::Error;
use tracing::{info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use onion_history::cli::{Cli, Command};
use onion_history::{build_cmd, clean_cmd, dates_cmd, fetch_cmd};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("onion-history starting up");

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Fetch(args) => fetch_cmd::run(args).await,
        Command::Dates(args) => dates_cmd::run(args).await,
        Command::Clean(args) => clean_cmd::run(args).await,
        Command::Build(args) => build_cmd::run(args).await,
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    result
}
