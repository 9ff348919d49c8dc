//! Property-based tests for the dedup building blocks.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Title memory never exceeds capacity and keeps the newest titles
//! - Similarity scores are bounded, symmetric, and 100 on identity
//! - Filter decisions depend only on the documented rules

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use newsdedup::services::{FeedFilter, TitleMemory, token_sort_ratio};
use proptest::prelude::*;

fn headline(feed_id: &str, feed_title: &str) -> newsdedup::Headline {
    serde_json::from_value(serde_json::json!({
        "id": 1,
        "title": "t",
        "feed_id": feed_id,
        "feed_title": feed_title,
    }))
    .expect("valid headline")
}

proptest! {
    /// Property: memory length never exceeds capacity.
    #[test]
    fn prop_memory_never_exceeds_capacity(
        capacity in 1usize..50,
        titles in prop::collection::vec(".{0,30}", 0..200)
    ) {
        let mut memory = TitleMemory::new(capacity);
        for title in &titles {
            memory.push(title.clone());
            prop_assert!(memory.len() <= capacity);
        }
    }

    /// Property: after overflow, exactly the most recent `capacity`
    /// titles remain, oldest first.
    #[test]
    fn prop_memory_keeps_newest_suffix(
        capacity in 1usize..20,
        titles in prop::collection::vec("[a-z]{0,10}", 0..60)
    ) {
        let mut memory = TitleMemory::new(capacity);
        for title in &titles {
            memory.push(title.clone());
        }
        let kept: Vec<&str> = memory.iter().collect();
        let start = titles.len().saturating_sub(capacity);
        let expected: Vec<&str> = titles[start..].iter().map(String::as_str).collect();
        prop_assert_eq!(kept, expected);
    }

    /// Property: scores stay in [0, 100].
    #[test]
    fn prop_score_bounded(a in ".{0,40}", b in ".{0,40}") {
        let score = token_sort_ratio(&a, &b);
        prop_assert!(score <= 100);
    }

    /// Property: scoring is symmetric.
    #[test]
    fn prop_score_symmetric(a in ".{0,40}", b in ".{0,40}") {
        prop_assert_eq!(token_sort_ratio(&a, &b), token_sort_ratio(&b, &a));
    }

    /// Property: a string scores 100 against itself.
    #[test]
    fn prop_score_identity(x in ".{0,40}") {
        prop_assert_eq!(token_sort_ratio(&x, &x), 100);
    }

    /// Property: token order never changes the score.
    #[test]
    fn prop_score_ignores_token_order(
        tokens in prop::collection::vec("[a-z]{1,8}", 1..6)
    ) {
        let forward = tokens.join(" ");
        let mut backward_tokens = tokens.clone();
        backward_tokens.reverse();
        let backward = backward_tokens.join(" ");
        prop_assert_eq!(token_sort_ratio(&forward, &backward), 100);
    }

    /// Property: a non-empty include list rejects any feed title that
    /// contains no include entry, regardless of the ignore set.
    #[test]
    fn prop_include_miss_rejects(
        ignore in prop::collection::vec("[0-9]{1,3}", 0..5),
        feed_id in "[0-9]{1,3}",
    ) {
        let filter = FeedFilter::new(&ignore, &["Weather".to_string()]);
        prop_assert!(!filter.admit(&headline(&feed_id, "Sports Desk")));
    }

    /// Property: an ignored feed id is rejected regardless of the
    /// include outcome.
    #[test]
    fn prop_ignored_feed_rejects(
        feed_id in "[0-9]{1,3}",
        include_matches in any::<bool>(),
    ) {
        let include = if include_matches {
            vec!["Weather".to_string()]
        } else {
            Vec::new()
        };
        let filter = FeedFilter::new(std::slice::from_ref(&feed_id), &include);
        prop_assert!(!filter.admit(&headline(&feed_id, "Weather Wire")));
    }
}
