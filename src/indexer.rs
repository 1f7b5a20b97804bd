//! Transforms the flat headline corpus into the day-keyed index.
//!
//! This is the core of the `build` pipeline step. It groups every dated
//! record under its `"MM-DD"` key, orders each day's headlines newest-first,
//! and derives the per-day year list and count. Records without a resolvable
//! date are dropped and counted, never fatal.
//!
//! The index is deterministic: the same corpus always produces the same
//! artifact, byte for byte, because grouping is keyed by a `BTreeMap` and
//! the per-day sort is stable.

use chrono::{DateTime, Datelike, NaiveDate};
use itertools::Itertools;
use std::cmp::Reverse;
use tracing::{info, instrument, warn};

use crate::calendar;
use crate::models::{ArchivedHeadline, DayIndex, RawHeadline};

/// Default tag for records whose source listing carried none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The result of one index build: the artifact plus its bookkeeping counts.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// The day-keyed index.
    pub index: DayIndex,
    /// Records seen in the input corpus.
    pub total: usize,
    /// Records that made it into the index.
    pub indexed: usize,
    /// Records dropped for a missing or unparseable date.
    pub skipped: usize,
}

/// Summary numbers for a built index, logged at the end of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    /// Calendar days with at least one headline.
    pub days: usize,
    /// Total headlines across all days.
    pub headlines: usize,
    /// Headlines per covered day, rounded to the nearest whole number.
    pub avg_per_day: usize,
    /// The day key with the most headlines and its count; ties go to the
    /// earliest key in calendar order.
    pub busiest: Option<(String, usize)>,
}

/// Resolve a record's raw date string to a calendar date.
///
/// Accepts full RFC 3339 datetimes (the form the site's `<time>` elements
/// carry) and bare `YYYY-MM-DD` values, including ones with a `T` suffix
/// whose time portion is unparseable. Anything else is `None`.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    let prefix = raw.split_once('T').map_or(raw, |(date, _)| date).trim();
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Build the day index from the flat corpus.
///
/// Each dated record lands under its zero-padded `"MM-DD"` key with its
/// year split out; records missing a tag get [`UNCATEGORIZED`]. Per day,
/// headlines are sorted year-descending with corpus order breaking ties,
/// `years` holds the distinct years descending, and `count` matches the
/// headline list. Undated records are skipped and counted.
///
/// # Arguments
///
/// * `records` - The raw corpus, in crawl order
///
/// # Returns
///
/// The index plus total/indexed/skipped counts. An empty corpus produces an
/// empty index.
#[instrument(level = "info", skip_all, fields(records = records.len()))]
pub fn build_index(records: &[RawHeadline]) -> BuildOutcome {
    let mut index = DayIndex::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(date) = record.date.as_deref().and_then(parse_record_date) else {
            skipped += 1;
            continue;
        };
        let tag = match record.tag.as_deref() {
            Some(tag) if !tag.is_empty() => tag.to_string(),
            _ => UNCATEGORIZED.to_string(),
        };
        index
            .entry(calendar::date_key(date))
            .or_default()
            .headlines
            .push(ArchivedHeadline {
                headline: record.headline.clone(),
                url: record.url.clone(),
                tag,
                year: date.year(),
            });
    }

    for entry in index.values_mut() {
        // Stable sort, so records from the same year keep corpus order.
        entry.headlines.sort_by_key(|h| Reverse(h.year));
        entry.years = entry.headlines.iter().map(|h| h.year).dedup().collect();
        entry.count = entry.headlines.len();
    }

    let indexed = records.len() - skipped;
    if skipped > 0 {
        warn!(skipped, "Dropped records without a resolvable date");
    }
    info!(
        indexed,
        days = index.len(),
        "Indexed corpus into day entries"
    );

    BuildOutcome {
        index,
        total: records.len(),
        indexed,
        skipped,
    }
}

/// Compute the summary stats for a built index.
pub fn index_stats(index: &DayIndex) -> IndexStats {
    let days = index.len();
    let headlines: usize = index.values().map(|entry| entry.count).sum();
    let avg_per_day = if days == 0 {
        0
    } else {
        (headlines as f64 / days as f64).round() as usize
    };

    let mut busiest: Option<(String, usize)> = None;
    for (key, entry) in index {
        match &busiest {
            Some((_, max)) if *max >= entry.count => {}
            _ => busiest = Some((key.clone(), entry.count)),
        }
    }

    IndexStats {
        days,
        headlines,
        avg_per_day,
        busiest,
    }
}
