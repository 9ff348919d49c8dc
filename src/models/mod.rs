//! Shared data types.
//!
//! The central record is [`Headline`], the backend's view of one article.
//! Headlines are read-only to the engine: they are produced by the
//! backend client, consumed transiently during a cycle, and never written
//! back (marking an article read goes through a separate API call).

use serde::{Deserialize, Deserializer};

/// One article record as exposed by the Tiny Tiny RSS API.
#[derive(Debug, Clone, Deserialize)]
pub struct Headline {
    /// Backend-assigned article id. Monotonically increasing per backend,
    /// not necessarily contiguous.
    pub id: u64,
    /// Article title.
    pub title: String,
    /// Whether the article is still unread.
    #[serde(default)]
    pub unread: bool,
    /// Whether the article is starred.
    #[serde(default)]
    pub marked: bool,
    /// Whether this record is an update to a previously published article.
    /// Updated articles are never dedup candidates.
    #[serde(default)]
    pub is_updated: bool,
    /// Identifier of the feed the article came from. The API serves this
    /// as either a JSON number or a string depending on version, so it is
    /// normalized to a string here.
    #[serde(deserialize_with = "feed_id_as_string")]
    pub feed_id: String,
    /// Human-readable name of the feed.
    #[serde(default)]
    pub feed_title: String,
    /// Link to the article, when the backend includes one.
    #[serde(default)]
    pub link: Option<String>,
}

/// Accepts `"42"` or `42` for `feed_id`.
fn feed_id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(id) => id.to_string(),
        Raw::Str(id) => id,
    })
}

/// Which slice of articles a headline fetch should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Every article, read or not. Used by the bootstrap learn phase and
    /// the unstar tool.
    AllArticles,
    /// Unread articles only. Used by the monitoring cycle.
    Unread,
}

impl ViewMode {
    /// The `view_mode` value the API expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllArticles => "all_articles",
            Self::Unread => "unread",
        }
    }
}
