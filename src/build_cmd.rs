//! The `build` pipeline step: write the day-index artifact.
//!
//! Reads the corpus, runs the indexer, logs the coverage stats, and writes
//! `data/by-day.json`. This is the last offline step; everything the
//! serving layer does reads from the artifact produced here.

use std::error::Error;
use tracing::{info, instrument};

use crate::artifacts;
use crate::cli::BuildArgs;
use crate::indexer;

/// Run the index build described by `args`.
///
/// # Errors
///
/// Fails when the corpus cannot be read or parsed, or the artifact cannot
/// be written. Undated records are not errors; they are dropped and show
/// up in the logged counts.
#[instrument(level = "info", skip_all, fields(input = %args.input.display()))]
pub async fn run(args: BuildArgs) -> Result<(), Box<dyn Error>> {
    let records = artifacts::read_headlines(&args.input).await?;
    let outcome = indexer::build_index(&records);
    let stats = indexer::index_stats(&outcome.index);

    info!(
        total = outcome.total,
        indexed = outcome.indexed,
        skipped = outcome.skipped,
        "Indexed records"
    );
    info!(
        days = stats.days,
        headlines = stats.headlines,
        avg_per_day = stats.avg_per_day,
        "Calendar coverage"
    );
    if let Some((day, count)) = &stats.busiest {
        info!(%day, count, "Busiest day");
    }

    artifacts::write_day_index(&args.output, &outcome.index).await?;
    Ok(())
}
