//! Backend client boundary.
//!
//! The engine talks to the RSS backend only through the [`NewsBackend`]
//! trait, so tests can substitute an in-memory fake. [`TtRssClient`] is
//! the production implementation over the Tiny Tiny RSS JSON API.

mod ttrss;

pub use ttrss::TtRssClient;

use crate::Result;
use crate::models::{Headline, ViewMode};

/// Virtual feed id covering every feed.
pub const FEED_ALL_ARTICLES: i64 = -4;

/// Virtual feed id covering starred articles.
pub const FEED_STARRED: i64 = -1;

/// Parameters for one page of a headline fetch.
#[derive(Debug, Clone, Copy)]
pub struct HeadlinesRequest {
    /// Feed (or virtual feed) to fetch from.
    pub feed_id: i64,
    /// Which read-state slice to fetch.
    pub view_mode: ViewMode,
    /// Only return articles with ids above this value.
    pub since_id: u64,
    /// Maximum number of headlines in the page.
    pub limit: u32,
    /// Number of headlines to skip (pagination offset).
    pub skip: u32,
}

impl HeadlinesRequest {
    /// A request for one page of the all-articles view.
    #[must_use]
    pub const fn all_articles(limit: u32, skip: u32) -> Self {
        Self {
            feed_id: FEED_ALL_ARTICLES,
            view_mode: ViewMode::AllArticles,
            since_id: 0,
            limit,
            skip,
        }
    }

    /// A request for one page of unread articles above `since_id`.
    #[must_use]
    pub const fn unread(since_id: u64, limit: u32, skip: u32) -> Self {
        Self {
            feed_id: FEED_ALL_ARTICLES,
            view_mode: ViewMode::Unread,
            since_id,
            limit,
            skip,
        }
    }

    /// A request for one page of starred articles.
    #[must_use]
    pub const fn starred(limit: u32) -> Self {
        Self {
            feed_id: FEED_STARRED,
            view_mode: ViewMode::AllArticles,
            since_id: 0,
            limit,
            skip: 0,
        }
    }
}

/// Operations the dedup engine and the unstar tool need from the backend.
pub trait NewsBackend {
    /// Fetches one page of headlines.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported error.
    fn headlines(&self, request: &HeadlinesRequest) -> Result<Vec<Headline>>;

    /// Marks an article as read.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported error.
    fn mark_read(&self, article_id: u64) -> Result<()>;

    /// Clears an article's star.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a backend-reported error.
    fn clear_star(&self, article_id: u64) -> Result<()>;
}
