//! Exclusion rules for the corpus cleaner.
//!
//! Some listing categories never make sense in a headline archive: recurring
//! formats (horoscopes, cartoons), man-on-the-street quotes, video posts.
//! [`FilterConfig`] holds the two rule lists, tag exclusions and headline
//! substring patterns, with the stock defaults built in and a YAML override
//! for tuning without a rebuild:
//!
//! ```yaml
//! excluded_tags:
//!   - Cartoons
//! excluded_patterns:
//!   - Horoscope
//! ```
//!
//! A record is dropped by its tag first; only untagged or allowed-tag
//! records are checked against the patterns, and the first matching pattern
//! takes the credit. That keeps the removal report unambiguous: every
//! dropped record is counted exactly once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::models::RawHeadline;

/// The cleaner's rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Records with one of these tags are dropped.
    pub excluded_tags: Vec<String>,
    /// Records whose headline contains one of these substrings are dropped.
    /// Matching is case-sensitive; the site title-cases its formats.
    pub excluded_patterns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            excluded_tags: vec![
                "American Voices".to_string(),
                "Cartoons".to_string(),
                "Commentary".to_string(),
                "Video".to_string(),
            ],
            excluded_patterns: vec![
                "Horoscope".to_string(),
                "Artist Profile".to_string(),
                "Editorial Cartoon".to_string(),
            ],
        }
    }
}

/// What one cleaning pass removed and why.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Records examined.
    pub total: usize,
    /// Records that survived.
    pub kept: usize,
    /// Records dropped.
    pub removed: usize,
    /// Removal counts per excluded tag.
    pub by_tag: BTreeMap<String, usize>,
    /// Removal counts per matched pattern.
    pub by_pattern: BTreeMap<String, usize>,
}

enum Exclusion<'a> {
    Tag(&'a str),
    Pattern(&'a str),
}

impl FilterConfig {
    /// Load a rule set from a YAML file. Missing keys fall back to the
    /// stock defaults, so an override file can name just one list.
    pub async fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(path).await?;
        let config: FilterConfig = serde_yaml::from_str(&raw)?;
        info!(
            path = %path.display(),
            tags = config.excluded_tags.len(),
            patterns = config.excluded_patterns.len(),
            "Loaded filter rules"
        );
        Ok(config)
    }

    /// Apply the rules to a corpus, returning the surviving records and a
    /// removal report.
    pub fn apply(&self, records: &[RawHeadline]) -> (Vec<RawHeadline>, FilterReport) {
        let mut kept = Vec::with_capacity(records.len());
        let mut report = FilterReport {
            total: records.len(),
            ..FilterReport::default()
        };

        for record in records {
            match self.exclusion_for(record) {
                Some(Exclusion::Tag(tag)) => {
                    *report.by_tag.entry(tag.to_string()).or_default() += 1;
                }
                Some(Exclusion::Pattern(pattern)) => {
                    *report.by_pattern.entry(pattern.to_string()).or_default() += 1;
                }
                None => kept.push(record.clone()),
            }
        }

        report.kept = kept.len();
        report.removed = report.total - report.kept;
        (kept, report)
    }

    fn exclusion_for(&self, record: &RawHeadline) -> Option<Exclusion<'_>> {
        if let Some(tag) = record.tag.as_deref() {
            if let Some(hit) = self.excluded_tags.iter().find(|t| t.as_str() == tag) {
                return Some(Exclusion::Tag(hit));
            }
        }
        self.excluded_patterns
            .iter()
            .find(|pattern| record.headline.contains(pattern.as_str()))
            .map(|hit| Exclusion::Pattern(hit.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(headline: &str, tag: Option<&str>) -> RawHeadline {
        RawHeadline {
            headline: headline.to_string(),
            url: format!("https://example.com/{}", headline.len()),
            tag: tag.map(String::from),
            date: None,
            page: None,
        }
    }

    #[test]
    fn test_default_rules() {
        let config = FilterConfig::default();
        assert_eq!(config.excluded_tags.len(), 4);
        assert!(config.excluded_tags.contains(&"American Voices".to_string()));
        assert_eq!(config.excluded_patterns.len(), 3);
        assert!(config.excluded_patterns.contains(&"Horoscope".to_string()));
    }

    #[test]
    fn test_apply_counts_every_removal_once() {
        let config = FilterConfig::default();
        let records = vec![
            record("Area Man Wins", Some("Local")),
            record("This Week In Cartoons", Some("Cartoons")),
            record("Your Horoscope For The Week", Some("Lifestyle")),
            record("Nation Shrugs", None),
        ];

        let (kept, report) = config.apply(&records);
        let survivors: Vec<&str> = kept.iter().map(|r| r.headline.as_str()).collect();
        assert_eq!(survivors, vec!["Area Man Wins", "Nation Shrugs"]);
        assert_eq!(report.total, 4);
        assert_eq!(report.kept, 2);
        assert_eq!(report.removed, 2);
        assert_eq!(report.by_tag.get("Cartoons"), Some(&1));
        assert_eq!(report.by_pattern.get("Horoscope"), Some(&1));
        assert_eq!(report.kept + report.removed, report.total);
    }

    #[test]
    fn test_tag_exclusion_wins_over_pattern() {
        let config = FilterConfig::default();
        let records = vec![record("Horoscope Video Special", Some("Video"))];

        let (kept, report) = config.apply(&records);
        assert!(kept.is_empty());
        assert_eq!(report.by_tag.get("Video"), Some(&1));
        assert!(report.by_pattern.is_empty());
    }

    #[test]
    fn test_first_matching_pattern_takes_credit() {
        let config = FilterConfig::default();
        let records = vec![record("Artist Profile: Horoscope Painter", Some("Arts"))];

        let (_, report) = config.apply(&records);
        assert_eq!(report.by_pattern.get("Horoscope"), Some(&1));
        assert_eq!(report.by_pattern.get("Artist Profile"), None);
    }

    #[test]
    fn test_pattern_matching_is_case_sensitive() {
        let config = FilterConfig::default();
        let records = vec![record("your horoscope, unstyled", None)];

        let (kept, report) = config.apply(&records);
        assert_eq!(kept.len(), 1);
        assert_eq!(report.removed, 0);
    }

    #[test]
    fn test_empty_rules_keep_everything() {
        let config = FilterConfig {
            excluded_tags: vec![],
            excluded_patterns: vec![],
        };
        let records = vec![
            record("This Week In Cartoons", Some("Cartoons")),
            record("Your Horoscope", None),
        ];

        let (kept, report) = config.apply(&records);
        assert_eq!(kept.len(), 2);
        assert_eq!(report.removed, 0);
    }

    #[tokio::test]
    async fn test_load_partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.yaml");
        fs::write(&path, "excluded_tags:\n  - Sports\n").await.unwrap();

        let config = FilterConfig::load(&path).await.unwrap();
        assert_eq!(config.excluded_tags, vec!["Sports".to_string()]);
        assert_eq!(config.excluded_patterns, FilterConfig::default().excluded_patterns);
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.yaml");
        fs::write(&path, "excluded_tags: {not: [a, list}").await.unwrap();

        assert!(FilterConfig::load(&path).await.is_err());
    }
}
