//! Shareable slugs for pointing at one headline out of the whole corpus.
//!
//! A headline slug is a human-readable prefix built from the headline text
//! plus the headline's position in the flattened corpus, e.g.
//! `nation-shocked-by-thing-4821`. Only the trailing index is authoritative;
//! the prefix exists so shared links read well and survives any amount of
//! mangling. Decoding therefore never inspects the prefix.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_INDEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-(\d+)$").unwrap());

/// Encode a headline and its corpus index as a shareable slug.
///
/// The prefix is built by lowercasing the headline, dropping apostrophes
/// (straight and curly) so contractions stay joined, dropping every other
/// character outside `a-z`, `0-9`, whitespace, and `-`, then joining the
/// first six words with hyphens and truncating to 50 characters. The index
/// is appended as `-{index}`.
///
/// # Arguments
///
/// * `headline` - The headline text
/// * `index` - Position of the headline in the flattened corpus
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     headline_slug("The Area Man Does It Again: A Retrospective", 4821),
///     "the-area-man-does-it-again-4821",
/// );
/// ```
pub fn headline_slug(headline: &str, index: usize) -> String {
    let cleaned: String = headline
        .to_lowercase()
        .chars()
        .filter(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-'
        })
        .collect();
    let mut prefix = cleaned.split_whitespace().take(6).join("-");
    // All ASCII after the filter, so the byte cut is a char cut.
    prefix.truncate(50);
    format!("{prefix}-{index}")
}

/// Decode a headline slug back to its corpus index.
///
/// Only the trailing `-{digits}` matters; everything before it is
/// decorative. Returns `None` when the trailing index is missing or does
/// not fit in `usize`, which callers treat as "fall back to a random
/// headline".
pub fn parse_headline_slug(slug: &str) -> Option<usize> {
    let caps = SLUG_INDEX_RE.captures(slug)?;
    caps[1].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_slug_keeps_first_six_words() {
        assert_eq!(
            headline_slug("The Area Man Does It Again: A Retrospective", 4821),
            "the-area-man-does-it-again-4821"
        );
    }

    #[test]
    fn test_headline_slug_drops_apostrophes_inside_words() {
        assert_eq!(
            headline_slug("Nation’s Dogs Can't Even", 12),
            "nations-dogs-cant-even-12"
        );
    }

    #[test]
    fn test_headline_slug_strips_punctuation() {
        assert_eq!(
            headline_slug("Report: 9 Out Of 10 Doctors Agree!", 3),
            "report-9-out-of-10-doctors-3"
        );
    }

    #[test]
    fn test_headline_slug_truncates_long_prefix() {
        let slug = headline_slug(
            "aaaaaaaaaa bbbbbbbbbb cccccccccc dddddddddd eeeeeeeeee ffffffffff",
            7,
        );
        assert_eq!(slug.len(), 52);
        assert!(slug.starts_with("aaaaaaaaaa-bbbbbbbbbb-cccccccccc-dddddddddd-eeeeee"));
        assert!(slug.ends_with("-7"));
        assert_eq!(parse_headline_slug(&slug), Some(7));
    }

    #[test]
    fn test_headline_slug_empty_prefix() {
        assert_eq!(headline_slug("!!!", 7), "-7");
        assert_eq!(parse_headline_slug("-7"), Some(7));
    }

    #[test]
    fn test_parse_headline_slug_ignores_prefix() {
        assert_eq!(parse_headline_slug("totally-rewritten-prefix-4821"), Some(4821));
        assert_eq!(parse_headline_slug("x-0"), Some(0));
        assert_eq!(parse_headline_slug("abc-00123"), Some(123));
    }

    #[test]
    fn test_parse_headline_slug_rejects_missing_index() {
        assert_eq!(parse_headline_slug("no-trailing-number"), None);
        assert_eq!(parse_headline_slug("1234"), None);
        assert_eq!(parse_headline_slug("ends-12a"), None);
        assert_eq!(parse_headline_slug(""), None);
    }

    #[test]
    fn test_parse_headline_slug_rejects_overflow() {
        assert_eq!(parse_headline_slug("big-99999999999999999999999999"), None);
    }
}
