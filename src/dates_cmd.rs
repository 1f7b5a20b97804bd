//! The `dates` pipeline step: backfill missing publication dates.
//!
//! Listing pages do not carry dates, so freshly crawled records arrive
//! undated. This step fetches each undated record's article page and copies
//! the `<time datetime=...>` value into the record. Fetches run concurrently
//! with a bounded fan-out, and the corpus is saved after every batch so an
//! interrupted run keeps what it found. Records whose page yields no date
//! are left undated; the indexer drops and counts them later.

use futures::stream::{self, StreamExt};
use std::error::Error;
use tracing::{error, info, instrument, warn};

use crate::artifacts;
use crate::cli::DatesArgs;
use crate::models::RawHeadline;
use crate::scrapers::onion;

/// Indices of records still missing a date, oldest-crawled first, cut to
/// `limit` when one is given.
fn undated_indices(records: &[RawHeadline], limit: Option<usize>) -> Vec<usize> {
    let mut missing: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.date.is_none())
        .map(|(i, _)| i)
        .collect();
    if let Some(limit) = limit {
        missing.truncate(limit);
    }
    missing
}

/// Run the backfill described by `args`.
///
/// # Errors
///
/// Fails when the corpus cannot be read or a save fails. Per-article fetch
/// problems are logged and skipped.
#[instrument(level = "info", skip_all, fields(input = %args.input.display()))]
pub async fn run(args: DatesArgs) -> Result<(), Box<dyn Error>> {
    let output = args.output.clone().unwrap_or_else(|| args.input.clone());
    let mut records = artifacts::read_headlines(&args.input).await?;

    let missing = undated_indices(&records, args.limit);
    info!(
        total = records.len(),
        missing = missing.len(),
        concurrency = args.concurrency,
        "Backfilling publication dates"
    );
    if missing.is_empty() {
        info!("Nothing to backfill");
        return Ok(());
    }

    let client = onion::client()?;
    let mut checked = 0usize;
    let mut found = 0usize;
    let mut unresolved = 0usize;

    for chunk in missing.chunks(args.save_interval.max(1)) {
        let jobs: Vec<(usize, String)> = chunk
            .iter()
            .map(|&i| (i, records[i].url.clone()))
            .collect();

        let results: Vec<(usize, Option<String>)> = stream::iter(jobs)
            .map(|(i, url)| {
                let client = client.clone();
                async move {
                    match onion::fetch_article_date(&client, &url).await {
                        Ok(Some(date)) => (i, Some(date)),
                        Ok(None) => {
                            warn!(%url, "Article page carries no datetime");
                            (i, None)
                        }
                        Err(e) => {
                            error!(%url, error = %e, "Article fetch failed");
                            (i, None)
                        }
                    }
                }
            })
            .buffer_unordered(args.concurrency)
            .collect()
            .await;

        let mut chunk_found = 0usize;
        for (i, date) in results {
            match date {
                Some(date) => {
                    records[i].date = Some(date);
                    chunk_found += 1;
                }
                None => unresolved += 1,
            }
        }
        checked += chunk.len();
        found += chunk_found;

        if chunk_found > 0 {
            artifacts::write_headlines(&output, &records).await?;
        }
        info!(checked, found, unresolved, "Backfill progress");
    }

    artifacts::write_headlines(&output, &records).await?;
    info!(found, unresolved, "Date backfill complete");
    Ok(())
}
