//! Data models for headline records and the day-keyed index built from them.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`RawHeadline`]: One record of the flat corpus produced by the crawler
//! - [`ArchivedHeadline`]: A record after indexing, with its date resolved to a year
//! - [`DayEntry`]: Every archived headline sharing one calendar month-day
//! - [`DayIndex`]: The full `"MM-DD"`-keyed index artifact
//! - [`Highlights`]: The per-day featured selection (computed, never persisted)
//!
//! The JSON field names match the artifacts the serving layer consumes, so
//! renames here are breaking changes to `data/headlines.json` and
//! `data/by-day.json`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw headline record as collected by the listing crawler.
///
/// This struct represents one element of `data/headlines.json`. Records
/// start life without a `date` (listing pages do not carry one); the
/// `dates` pipeline step fills it in from the article page. Optional
/// fields are omitted from the serialized form when absent.
///
/// # Fields
///
/// * `url` - Unique across the corpus; the crawler dedupes on it when resuming
/// * `page` - Listing page provenance, used to decide where a resumed crawl restarts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHeadline {
    /// The headline text exactly as published.
    pub headline: String,
    /// Canonical article URL.
    pub url: String,
    /// Category label from the listing page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// ISO-parseable publication datetime, filled in by the backfill step.
    /// Records without a resolvable date are dropped by the indexer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Listing page the record was scraped from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// An indexed headline: a raw record with its date resolved to a year.
///
/// This is the shape stored inside `data/by-day.json`. The month and day
/// live in the entry key, so only the year is kept per record. Records
/// whose source had no tag carry `"Uncategorized"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedHeadline {
    /// The headline text.
    pub headline: String,
    /// Canonical article URL.
    pub url: String,
    /// Category label, `"Uncategorized"` when the source had none.
    pub tag: String,
    /// Publication year.
    pub year: i32,
}

/// All archived headlines sharing one calendar month-day, across every year.
///
/// # Invariants
///
/// * `headlines` is sorted by `year` descending; ties keep corpus order
/// * `years` holds exactly the distinct years present, also descending
/// * `count == headlines.len()`
///
/// Leap-day (`"02-29"`) entries are ordinary entries; they simply have no
/// matches outside leap years.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Headlines for this day, newest year first.
    pub headlines: Vec<ArchivedHeadline>,
    /// Distinct years present, descending.
    pub years: Vec<i32>,
    /// Number of headlines for this day.
    pub count: usize,
}

/// The day index artifact: zero-padded `"MM-DD"` keys to their entries.
///
/// Only days with at least one record appear. A `BTreeMap` keeps the
/// serialized artifact byte-stable across rebuilds of the same corpus.
pub type DayIndex = BTreeMap<String, DayEntry>;

/// The featured selection for one day: the newest and oldest headlines plus
/// up to three archive picks from other decades.
///
/// Produced by [`crate::highlights::select`] on demand and serialized
/// straight into API responses; never written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlights {
    /// The most recent headline for the day.
    pub newest: ArchivedHeadline,
    /// The earliest headline for the day.
    pub oldest: ArchivedHeadline,
    /// Picks spanning decades other than newest's and oldest's.
    #[serde(rename = "fromTheArchive")]
    pub from_the_archive: Vec<ArchivedHeadline>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_headline_optional_fields_omitted() {
        let record = RawHeadline {
            headline: "Area Man Unsure".to_string(),
            url: "https://example.com/a".to_string(),
            tag: None,
            date: None,
            page: None,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("Area Man Unsure"));
        assert!(!json.contains("tag"));
        assert!(!json.contains("date"));
        assert!(!json.contains("page"));
    }

    #[test]
    fn test_raw_headline_deserializes_without_optional_fields() {
        let json = r#"{
            "headline": "Nation Celebrates",
            "url": "https://example.com/b"
        }"#;

        let record: RawHeadline = serde_json::from_str(json).unwrap();
        assert_eq!(record.headline, "Nation Celebrates");
        assert_eq!(record.tag, None);
        assert_eq!(record.date, None);
        assert_eq!(record.page, None);
    }

    #[test]
    fn test_raw_headline_round_trip() {
        let record = RawHeadline {
            headline: "Study Finds Thing".to_string(),
            url: "https://example.com/c".to_string(),
            tag: Some("Science".to_string()),
            date: Some("2015-03-15T10:30:00-04:00".to_string()),
            page: Some(42),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: RawHeadline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_day_entry_serialization_shape() {
        let entry = DayEntry {
            headlines: vec![ArchivedHeadline {
                headline: "Local Dog Elected".to_string(),
                url: "https://example.com/d".to_string(),
                tag: "Local".to_string(),
                year: 2015,
            }],
            years: vec![2015],
            count: 1,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""years":[2015]"#));
        assert!(json.contains(r#""count":1"#));
    }

    #[test]
    fn test_day_index_deserializes_artifact_shape() {
        let json = r#"{
            "03-15": {
                "headlines": [
                    {"headline": "H", "url": "u", "tag": "Local", "year": 2015}
                ],
                "years": [2015],
                "count": 1
            }
        }"#;

        let index: DayIndex = serde_json::from_str(json).unwrap();
        let entry = index.get("03-15").unwrap();
        assert_eq!(entry.count, 1);
        assert_eq!(entry.headlines[0].year, 2015);
    }

    #[test]
    fn test_highlights_archive_field_name() {
        let pick = ArchivedHeadline {
            headline: "H".to_string(),
            url: "u".to_string(),
            tag: "Local".to_string(),
            year: 2001,
        };
        let highlights = Highlights {
            newest: pick.clone(),
            oldest: pick.clone(),
            from_the_archive: vec![pick],
        };

        let json = serde_json::to_string(&highlights).unwrap();
        assert!(json.contains(r#""fromTheArchive":"#));
        assert!(!json.contains("from_the_archive"));
    }
}
