//! Deterministic featured-headline selection for a single day entry.
//!
//! Given one day's headlines, [`select`] produces the newest and oldest
//! records plus up to three "from the archive" picks drawn from decades
//! other than theirs. The selection uses no randomness: the same entry
//! always yields the same highlights, so a day's page is stable across
//! reloads and servers without any caching or session state.
//!
//! The archive picks favor spread over fill. A day whose records cluster
//! in one or two decades can legitimately end up with fewer than three
//! picks, or none; the fallback only tops up from the middle of the list
//! when the decade walk found fewer than two.

use std::collections::{BTreeMap, HashSet};

use crate::models::{ArchivedHeadline, DayEntry, Highlights};

/// Compute the featured selection for one day entry.
///
/// `newest` is the entry's first headline and `oldest` its last (the same
/// record when the entry has exactly one). Archive picks come from a walk
/// over the decades present:
///
/// 1. Bucket headlines by decade, following the entry's year list so each
///    bucket stays year-descending with corpus order within a year.
/// 2. Drop the decades of `newest` and `oldest`; visit the rest ascending,
///    at most three.
/// 3. From the bucket at position `i`, take the headline at index
///    `(count * (i + 1)) % bucket_len`. The arithmetic is part of the
///    artifact contract; published day pages depend on it.
///
/// If that walk yields fewer than two picks and the entry holds more than
/// two headlines, the interior of the list (everything but first and last)
/// is scanned in order, appending headlines whose year has not been used
/// yet, until there are three picks or the interior runs out.
///
/// # Returns
///
/// `None` only for an entry with no headlines, which a built index never
/// contains.
pub fn select(entry: &DayEntry) -> Option<Highlights> {
    let newest = entry.headlines.first()?.clone();
    let oldest = entry.headlines.last()?.clone();

    let mut by_decade: BTreeMap<i32, Vec<&ArchivedHeadline>> = BTreeMap::new();
    for &year in &entry.years {
        by_decade
            .entry(decade(year))
            .or_default()
            .extend(entry.headlines.iter().filter(|h| h.year == year));
    }

    let newest_decade = decade(newest.year);
    let oldest_decade = decade(oldest.year);

    let mut picks: Vec<ArchivedHeadline> = Vec::new();
    let candidates = by_decade
        .iter()
        .filter(|(d, _)| **d != newest_decade && **d != oldest_decade)
        .take(3);
    for (i, (_, bucket)) in candidates.enumerate() {
        // Empty only when the entry's year list names a year with no headline.
        if bucket.is_empty() {
            continue;
        }
        picks.push(bucket[(entry.count * (i + 1)) % bucket.len()].clone());
    }

    if picks.len() < 2 && entry.headlines.len() > 2 {
        let mut seen: HashSet<i32> = HashSet::new();
        seen.insert(newest.year);
        seen.insert(oldest.year);
        seen.extend(picks.iter().map(|h| h.year));
        for headline in &entry.headlines[1..entry.headlines.len() - 1] {
            if seen.insert(headline.year) {
                picks.push(headline.clone());
                if picks.len() >= 3 {
                    break;
                }
            }
        }
    }

    Some(Highlights {
        newest,
        oldest,
        from_the_archive: picks,
    })
}

/// Group headlines by year, keys ascending, corpus order within a year.
///
/// Used by the full-archive view to render one block per year.
pub fn group_by_year(headlines: &[ArchivedHeadline]) -> BTreeMap<i32, Vec<&ArchivedHeadline>> {
    let mut grouped: BTreeMap<i32, Vec<&ArchivedHeadline>> = BTreeMap::new();
    for headline in headlines {
        grouped.entry(headline.year).or_default().push(headline);
    }
    grouped
}

fn decade(year: i32) -> i32 {
    (year / 10) * 10
}
