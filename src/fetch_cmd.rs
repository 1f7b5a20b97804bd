//! The `fetch` pipeline step: crawl the listing archive into the corpus.
//!
//! The crawl walks `/latest/` page by page until a page comes back empty or
//! fails, absorbing records it has not seen before (by URL). Runs are
//! resumable: records remember the listing page they came from, so a later
//! run restarts at the deepest page already collected and re-checks page 1
//! for anything published since. The corpus is saved incrementally so an
//! interrupted crawl loses at most a few pages of work.

use std::collections::HashSet;
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

use crate::artifacts;
use crate::cli::FetchArgs;
use crate::models::RawHeadline;
use crate::scrapers::onion;

/// Crawl bookkeeping: everything collected so far plus the URL dedupe set.
#[derive(Default)]
struct CrawlState {
    records: Vec<RawHeadline>,
    seen: HashSet<String>,
}

impl CrawlState {
    /// Seed the state from an existing corpus. Returns the state and the
    /// deepest listing page any record came from, 0 when none carry one.
    fn seed(existing: Vec<RawHeadline>) -> (Self, u32) {
        let seen = existing.iter().map(|r| r.url.clone()).collect();
        let last_page = existing.iter().filter_map(|r| r.page).max().unwrap_or(0);
        (
            Self {
                records: existing,
                seen,
            },
            last_page,
        )
    }

    /// Absorb one page of records, skipping URLs already collected.
    /// Returns how many were new.
    fn absorb(&mut self, items: Vec<RawHeadline>) -> usize {
        let mut added = 0;
        for item in items {
            if self.seen.insert(item.url.clone()) {
                self.records.push(item);
                added += 1;
            }
        }
        added
    }
}

/// Run the crawl described by `args`.
///
/// # Errors
///
/// Fails when the output location is not writable or a corpus save fails.
/// Listing fetch errors are not fatal; they end the crawl with whatever
/// was collected, since deeper pages are unreachable anyway once the site
/// starts erroring.
#[instrument(level = "info", skip_all, fields(output = %args.output.display()))]
pub async fn run(args: FetchArgs) -> Result<(), Box<dyn Error>> {
    artifacts::ensure_writable(&args.output).await?;

    let mut state = CrawlState::default();
    let mut start_page = args.start_page;
    let mut recheck_first = false;

    if !args.fresh {
        match artifacts::read_headlines(&args.output).await {
            Ok(existing) => {
                let (seeded, last_page) = CrawlState::seed(existing);
                info!(
                    records = seeded.records.len(),
                    last_page, "Resuming existing corpus"
                );
                state = seeded;
                start_page = start_page.max(last_page);
                recheck_first = last_page > 1;
            }
            Err(e) => {
                warn!(error = %e, "Could not read existing corpus; starting fresh");
            }
        }
    }

    let client = onion::client()?;

    // A resumed crawl restarts deep in the archive, so look at page 1
    // first for records published since the last run.
    if recheck_first {
        match onion::fetch_listing_page(&client, 1).await {
            Ok(items) => {
                let added = state.absorb(items);
                info!(added, "Rechecked first listing page");
            }
            Err(e) => warn!(error = %e, "First-page recheck failed; continuing"),
        }
        sleep(Duration::from_secs_f64(args.delay)).await;
    }

    let mut page = start_page;
    let mut crawled: u32 = 0;
    let mut unsaved_pages: u32 = 0;

    loop {
        if let Some(max) = args.max_pages {
            if crawled >= max {
                info!(crawled, "Reached the page limit");
                break;
            }
        }

        match onion::fetch_listing_page(&client, page).await {
            Ok(items) if items.is_empty() => {
                info!(page, "Listing page is empty; reached the end of the archive");
                break;
            }
            Ok(items) => {
                let added = state.absorb(items);
                info!(page, added, total = state.records.len(), "Crawled listing page");
                if added > 0 {
                    unsaved_pages += 1;
                    if unsaved_pages >= args.save_interval {
                        artifacts::write_headlines(&args.output, &state.records).await?;
                        unsaved_pages = 0;
                    }
                }
            }
            Err(e) => {
                warn!(page, error = %e, "Listing fetch failed; stopping the crawl");
                break;
            }
        }

        crawled += 1;
        page += 1;
        sleep(Duration::from_secs_f64(args.delay)).await;
    }

    artifacts::write_headlines(&args.output, &state.records).await?;
    info!(total = state.records.len(), "Crawl complete");
    Ok(())
}
