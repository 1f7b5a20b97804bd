//! Read-side access to the built day index.
//!
//! [`Archive`] loads `data/by-day.json` once and answers every query after
//! that from memory. Alongside the index itself it precomputes the global
//! derived state the serving layer needs on most requests:
//! - the flattened headline list, in day-key order (slug indices point here)
//! - the distinct publication years, ascending (the trivia year pool)
//! - the year range
//!
//! Nothing here mutates after construction, so an `Archive` can be shared
//! freely across concurrent readers.

use std::error::Error;
use std::path::Path;

use itertools::Itertools;
use rand::{rng, Rng};
use tracing::{info, instrument};

use crate::artifacts;
use crate::models::{ArchivedHeadline, DayEntry, DayIndex};

/// The loaded archive: the day index plus derived corpus-wide state.
#[derive(Debug, Clone)]
pub struct Archive {
    index: DayIndex,
    headlines: Vec<ArchivedHeadline>,
    years: Vec<i32>,
}

impl Archive {
    /// Build an archive from an already-loaded day index.
    ///
    /// Flattens the index in key order, so a headline's position here is
    /// stable for a given artifact and usable as a share-slug index.
    pub fn new(index: DayIndex) -> Self {
        let headlines: Vec<ArchivedHeadline> = index
            .values()
            .flat_map(|entry| entry.headlines.iter().cloned())
            .collect();
        let years: Vec<i32> = headlines
            .iter()
            .map(|h| h.year)
            .sorted()
            .dedup()
            .collect();
        Self {
            index,
            headlines,
            years,
        }
    }

    /// Load the day index artifact from disk and build the archive.
    ///
    /// # Errors
    ///
    /// Fails when the artifact is missing or unparseable; there is no
    /// degraded mode without an index.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let index = artifacts::read_day_index(path).await?;
        let archive = Self::new(index);
        info!(
            days = archive.index.len(),
            headlines = archive.headlines.len(),
            "Archive ready"
        );
        Ok(archive)
    }

    /// The entry for a `"MM-DD"` key, or `None` when no records exist for
    /// that day (including impossible keys like `"02-31"`).
    pub fn lookup(&self, key: &str) -> Option<&DayEntry> {
        self.index.get(key)
    }

    /// The day keys that have at least one headline, in calendar order.
    pub fn days_with_data(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Every headline, flattened in day-key order.
    pub fn headlines(&self) -> &[ArchivedHeadline] {
        &self.headlines
    }

    /// The headline at a flattened-corpus index; share slugs decode to this.
    pub fn headline_at(&self, index: usize) -> Option<&ArchivedHeadline> {
        self.headlines.get(index)
    }

    /// Distinct publication years across the corpus, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Earliest and latest publication years, or `None` for an empty archive.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }

    /// Total headline count across all days.
    pub fn total_headlines(&self) -> usize {
        self.headlines.len()
    }

    /// A uniformly random headline with its flattened index, for the trivia
    /// game and as the fallback when a share slug does not resolve.
    pub fn random_headline(&self) -> Option<(usize, &ArchivedHeadline)> {
        if self.headlines.is_empty() {
            return None;
        }
        let index = rng().random_range(0..self.headlines.len());
        Some((index, &self.headlines[index]))
    }
}
