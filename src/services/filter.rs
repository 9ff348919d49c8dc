//! Feed eligibility filtering.
//!
//! [`FeedFilter`] decides whether a headline is a dedup candidate at all.
//! Two rules, checked in order: the include list (when non-empty, at
//! least one entry must be a substring of the feed title) and the ignore
//! set (the feed id must not be listed). Both lists come from
//! configuration and are immutable after startup.

use crate::models::Headline;
use std::collections::HashSet;

/// Include/ignore rules applied before any similarity comparison.
#[derive(Debug)]
pub struct FeedFilter {
    ignore: HashSet<String>,
    include: Vec<String>,
}

impl FeedFilter {
    /// Builds a filter from the configured lists. Empty lists impose no
    /// restriction.
    #[must_use]
    pub fn new(ignore: &[String], include: &[String]) -> Self {
        Self {
            ignore: ignore.iter().cloned().collect(),
            include: include.to_vec(),
        }
    }

    /// Whether the headline is eligible for dedup consideration.
    #[must_use]
    pub fn admit(&self, headline: &Headline) -> bool {
        if !self.include.is_empty()
            && !self
                .include
                .iter()
                .any(|term| headline.feed_title.contains(term))
        {
            return false;
        }

        !self.ignore.contains(&headline.feed_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headline(feed_id: &str, feed_title: &str) -> Headline {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "t",
            "feed_id": feed_id,
            "feed_title": feed_title,
        }))
        .expect("valid headline")
    }

    #[test]
    fn empty_lists_admit_everything() {
        let filter = FeedFilter::new(&[], &[]);
        assert!(filter.admit(&headline("31", "Weather Wire")));
    }

    #[test]
    fn ignored_feed_id_rejected() {
        let filter = FeedFilter::new(&["31".to_string()], &[]);
        assert!(!filter.admit(&headline("31", "Weather Wire")));
        assert!(filter.admit(&headline("32", "Weather Wire")));
    }

    #[test]
    fn include_list_restricts_by_feed_title_substring() {
        let filter = FeedFilter::new(&[], &["Weather".to_string()]);
        assert!(filter.admit(&headline("1", "Weather Wire")));
        assert!(!filter.admit(&headline("1", "Sports Desk")));
    }

    #[test]
    fn include_miss_rejects_regardless_of_ignore_set() {
        // Include check first: a feed absent from the ignore set still
        // fails when it matches no include entry.
        let filter = FeedFilter::new(&["99".to_string()], &["Weather".to_string()]);
        assert!(!filter.admit(&headline("1", "Sports Desk")));
    }

    #[test]
    fn included_but_ignored_feed_rejected() {
        let filter = FeedFilter::new(&["31".to_string()], &["Weather".to_string()]);
        assert!(!filter.admit(&headline("31", "Weather Wire")));
    }
}
