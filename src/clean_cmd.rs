//! The `clean` pipeline step: drop excluded records from the corpus.
//!
//! Applies the [`crate::filters::FilterConfig`] rules, logs what each rule
//! removed, and rewrites the corpus in place. `--dry-run` reports the same
//! numbers without touching the file, which is how a new exclusion list
//! gets auditioned before it destroys records for good.

use std::error::Error;
use tracing::{info, instrument};

use crate::artifacts;
use crate::cli::CleanArgs;
use crate::filters::FilterConfig;

/// Run the cleaning pass described by `args`.
///
/// # Errors
///
/// Fails when the corpus or an override rules file cannot be read, or the
/// rewrite fails.
#[instrument(level = "info", skip_all, fields(input = %args.input.display()))]
pub async fn run(args: CleanArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.filters {
        Some(path) => FilterConfig::load(path).await?,
        None => FilterConfig::default(),
    };

    let records = artifacts::read_headlines(&args.input).await?;
    let (kept, report) = config.apply(&records);

    for (tag, removed) in &report.by_tag {
        info!(%tag, removed, "Removed by tag");
    }
    for (pattern, removed) in &report.by_pattern {
        info!(%pattern, removed, "Removed by pattern");
    }
    info!(
        total = report.total,
        kept = report.kept,
        removed = report.removed,
        "Clean summary"
    );

    if args.dry_run {
        info!("Dry run; corpus left untouched");
        return Ok(());
    }

    artifacts::write_headlines(&args.input, &kept).await?;
    Ok(())
}
