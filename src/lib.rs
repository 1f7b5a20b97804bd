//! # Onion History
//!
//! Build and query a day-indexed archive of The Onion's headlines: every
//! story the site has published, grouped by calendar month-day so that one
//! page can show "this day across the years", plus the helpers behind a
//! guess-the-year trivia game over the same corpus.
//!
//! ## The pipeline
//!
//! The corpus is static. It is assembled offline by the `onion-history`
//! binary, one subcommand per step, run in order:
//!
//! ```sh
//! onion-history fetch   # crawl /latest/ listing pages into data/headlines.json
//! onion-history dates   # backfill publication dates from article pages
//! onion-history clean   # drop excluded tags and recurring formats
//! onion-history build   # write the day index to data/by-day.json
//! ```
//!
//! `fetch` is resumable and polite (URL dedupe, page provenance, fixed
//! delay); `dates` fans out article fetches with bounded concurrency;
//! `clean` applies the [`filters`] rule lists; `build` runs the
//! [`indexer`] and reports coverage stats.
//!
//! ## The library
//!
//! A serving layer loads the built artifact once and queries it read-only:
//!
//! ```ignore
//! use onion_history::{calendar, highlights, Archive};
//! use std::path::Path;
//!
//! let archive = Archive::load(Path::new("data/by-day.json")).await?;
//! if let Some(entry) = archive.lookup(&calendar::today_key()) {
//!     let featured = highlights::select(entry);
//! }
//! ```
//!
//! Everything on the read side is deterministic or explicitly random:
//! [`highlights::select`] always returns the same picks for the same entry,
//! while [`archive::Archive::random_headline`] and [`trivia::distractors`]
//! are the two places randomness is allowed.

pub mod archive;
pub mod artifacts;
pub mod build_cmd;
pub mod calendar;
pub mod clean_cmd;
pub mod cli;
pub mod dates_cmd;
pub mod fetch_cmd;
pub mod filters;
pub mod highlights;
pub mod indexer;
pub mod models;
pub mod scrapers;
pub mod slug;
pub mod trivia;

pub use archive::Archive;
pub use models::{ArchivedHeadline, DayEntry, DayIndex, Highlights, RawHeadline};
