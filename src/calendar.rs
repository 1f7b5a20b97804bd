//! Year-agnostic calendar plumbing for `"MM-DD"` day keys.
//!
//! The archive is organized by calendar month-day, not by full date, so this
//! module owns everything that maps between the three spellings of a day:
//! - The index key: zero-padded `"MM-DD"` (e.g. `"03-15"`)
//! - The URL slug: lowercase month name plus unpadded day (e.g. `"march-15"`)
//! - The display form: capitalized month plus day (e.g. `"March 15"`)
//!
//! The calendar always includes February 29, giving 366 keys; leap day simply
//! has fewer matching records. Navigation wraps, so December 31 and January 1
//! are neighbors.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercase month names in calendar order; index 0 is January.
pub const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Days per month; February keeps its leap day.
const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

static ALL_DAYS: Lazy<Vec<String>> = Lazy::new(|| {
    let mut keys = Vec::with_capacity(366);
    for (m, &days) in DAYS_IN_MONTH.iter().enumerate() {
        for d in 1..=days {
            keys.push(format!("{:02}-{:02}", m + 1, d));
        }
    }
    keys
});

static DAY_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z]+)-(\d+)$").unwrap());

/// All 366 day keys in calendar order, `"01-01"` through `"12-31"`.
pub fn all_month_days() -> &'static [String] {
    &ALL_DAYS
}

/// Build the zero-padded `"MM-DD"` key for a month/day pair.
///
/// # Arguments
///
/// * `month` - Calendar month, 1-12
/// * `day` - Day of month, validated against that month's length
///
/// # Returns
///
/// The key, or `None` when the pair is not a day of the 366-day calendar
/// (February 29 is valid, February 30 is not).
pub fn month_day_key(month: u32, day: u32) -> Option<String> {
    let max = *DAYS_IN_MONTH.get(month.checked_sub(1)? as usize)?;
    if day == 0 || day > max {
        return None;
    }
    Some(format!("{month:02}-{day:02}"))
}

/// The `"MM-DD"` key for a concrete date.
pub fn date_key(date: NaiveDate) -> String {
    format!("{:02}-{:02}", date.month(), date.day())
}

/// Today's `"MM-DD"` key from the local clock.
pub fn today_key() -> String {
    date_key(Local::now().date_naive())
}

/// Today's day slug from the local clock, e.g. `"march-15"`.
pub fn today_slug() -> String {
    day_slug(&today_key()).unwrap_or_default()
}

/// Convert a `"MM-DD"` key to its URL slug.
///
/// The slug is the lowercase month name joined to the unpadded day with a
/// hyphen, so `"03-05"` becomes `"march-5"`.
///
/// # Returns
///
/// The slug, or `None` when the key does not name a month 1-12 and a day
/// 1-31.
pub fn day_slug(key: &str) -> Option<String> {
    let (month, day) = split_key(key)?;
    Some(format!("{}-{}", MONTHS[(month - 1) as usize], day))
}

/// Parse a day slug back into its `"MM-DD"` key.
///
/// Only the shape is checked: the month must be a real month name and the
/// day must fall in 1-31. Days past the month's end, like `"february-31"`,
/// still parse and simply find no index entry on lookup.
///
/// # Arguments
///
/// * `slug` - A candidate slug such as `"march-15"`
///
/// # Returns
///
/// The zero-padded key, or `None` for anything that is not
/// `lowercase-month-name` + `-` + `digits`.
pub fn parse_day_slug(slug: &str) -> Option<String> {
    let caps = DAY_SLUG_RE.captures(slug)?;
    let month = MONTHS.iter().position(|&name| name == &caps[1])? as u32 + 1;
    let day: u32 = caps[2].parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    Some(format!("{month:02}-{day:02}"))
}

/// Human-readable form of a key, e.g. `"03-15"` becomes `"March 15"`.
pub fn display_date(key: &str) -> Option<String> {
    let (month, day) = split_key(key)?;
    Some(format!("{} {}", upcase(MONTHS[(month - 1) as usize]), day))
}

/// The key of the day before `key`, wrapping January 1 back to December 31.
pub fn prev_day(key: &str) -> Option<String> {
    let days = all_month_days();
    let pos = days.iter().position(|k| k == key)?;
    let prev = if pos == 0 { days.len() - 1 } else { pos - 1 };
    Some(days[prev].clone())
}

/// The key of the day after `key`, wrapping December 31 to January 1.
pub fn next_day(key: &str) -> Option<String> {
    let days = all_month_days();
    let pos = days.iter().position(|k| k == key)?;
    Some(days[(pos + 1) % days.len()].clone())
}

/// Split a key into month and day, permissive about month length so display
/// and slug helpers treat keys the way slug parsing does.
fn split_key(key: &str) -> Option<(u32, u32)> {
    let (m, d) = key.split_once('-')?;
    let month: u32 = m.parse().ok()?;
    let day: u32 = d.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((month, day))
}

fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}
