//! # newsdedup
//!
//! Near-duplicate filter for a Tiny Tiny RSS unread-article stream.
//!
//! newsdedup watches newly arrived headlines, recognizes titles that are
//! close rewordings of recently seen titles (the same story republished by
//! several feeds), and marks the duplicates as read so a reader only ever
//! sees one copy.
//!
//! ## Architecture
//!
//! ```text
//! supervisor ──► DedupEngine ──► NewsBackend (Tiny Tiny RSS API)
//!                   │
//!                   ├─► FeedFilter      include/ignore rules
//!                   ├─► TitleMemory     bounded recent-title window
//!                   └─► similarity      token-sort ratio scorer
//! ```
//!
//! The engine runs one [`DedupEngine::run_cycle`] pass at a time; the
//! supervisor retries failed passes forever and only an interrupt stops
//! the process. All dedup state (the title window and the last-seen-id
//! cursor) lives on the engine instance, nowhere else.
//!
//! ## Example
//!
//! ```rust,ignore
//! use newsdedup::{Config, DedupEngine, TtRssClient};
//!
//! let config = Config::load("newsdedup.toml")?;
//! let client = TtRssClient::connect(&config.connection)?;
//! let mut engine = DedupEngine::new(client, &config.dedup, false);
//! engine.learn()?;
//! let stats = engine.run_cycle()?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate
// transitive dependencies) and cannot be moved to function level.
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod client;
pub mod config;
pub mod models;
pub mod observability;
pub mod services;

// Re-exports for convenience
pub use client::{HeadlinesRequest, NewsBackend, TtRssClient};
pub use config::{Config, ConnectionConfig, DedupConfig};
pub use models::{Headline, ViewMode};
pub use services::{CycleStats, DedupEngine, FeedFilter, TitleMemory, supervise, token_sort_ratio};

/// Error type for newsdedup operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Config` | Missing/unreadable config file, invalid section values |
/// | `Transport` | Connection refused, TLS failure, malformed response body |
/// | `Api` | Backend returned an error status (bad login, unknown method) |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The configuration file is missing, unreadable, or invalid.
    ///
    /// Fatal at startup: the process exits with status 1 before any
    /// backend contact.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP transport failure while talking to the backend.
    ///
    /// Recoverable: caught at the supervisor boundary and retried.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend accepted the request but reported a failure.
    ///
    /// Raised when:
    /// - The API envelope carries a non-zero status
    /// - The `content` payload does not decode as the expected shape
    /// - Login did not yield a session id
    #[error("backend operation '{operation}' failed: {cause}")]
    Api {
        /// The API operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for newsdedup operations.
pub type Result<T> = std::result::Result<T, Error>;
