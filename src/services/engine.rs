//! The dedup engine.
//!
//! [`DedupEngine`] owns every piece of dedup state: the title window, the
//! last-seen-id cursor, the feed filter, and the similarity threshold. It
//! runs in two phases. [`DedupEngine::learn`] seeds the window once at
//! startup from already-read history, so the first live cycle has
//! comparison material. [`DedupEngine::run_cycle`] performs one
//! monitoring pass: fetch every unread headline, sort by id, and decide
//! article by article whether to mark it read.
//!
//! A cycle never catches its own errors; anything that fails propagates
//! to the supervisor with cursor and window progress retained, so a
//! retried cycle resumes after the last fully processed article.

use crate::Result;
use crate::client::{HeadlinesRequest, NewsBackend};
use crate::config::DedupConfig;
use crate::services::filter::FeedFilter;
use crate::services::memory::TitleMemory;
use crate::services::similarity::token_sort_ratio;

/// Page size for headline fetches during monitoring.
const PAGE_LIMIT: u32 = 200;

/// Counters from one monitoring pass, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Headlines returned by the unread fetch, before cursor skipping.
    pub fetched: usize,
    /// Headlines actually processed (cursor advanced past them).
    pub processed: usize,
    /// Duplicates found (marked read, or reported in dry-run mode).
    pub marked: usize,
}

/// Deduplication engine over a [`NewsBackend`].
pub struct DedupEngine<B: NewsBackend> {
    backend: B,
    memory: TitleMemory,
    filter: FeedFilter,
    /// Similarity threshold; a score strictly above it is a duplicate.
    ratio: u32,
    /// Highest article id fully processed. Never decreases; ids at or
    /// below it are never reconsidered.
    last_seen_id: u64,
    dry_run: bool,
}

impl<B: NewsBackend> DedupEngine<B> {
    /// Creates an engine with an empty title window and the cursor at 0.
    #[must_use]
    pub fn new(backend: B, config: &DedupConfig, dry_run: bool) -> Self {
        Self {
            backend,
            memory: TitleMemory::new(config.maxcount),
            filter: FeedFilter::new(&config.ignore, &config.include),
            ratio: config.ratio,
            last_seen_id: 0,
            dry_run,
        }
    }

    /// Bootstrap phase: fills the title window from already-read history.
    ///
    /// Pages through the all-articles view and appends the title of every
    /// article that is no longer unread, until the window capacity is
    /// reached. Unread articles are skipped here on purpose: they are
    /// exactly what the monitoring phase must still evaluate fresh. Stops
    /// early if the backend runs out of history and returns the number of
    /// titles learned.
    ///
    /// # Errors
    ///
    /// Returns an error if a headline fetch fails.
    pub fn learn(&mut self) -> Result<usize> {
        let target = self.memory.capacity();
        let limit = u32::try_from(target).unwrap_or(PAGE_LIMIT).min(PAGE_LIMIT);
        let mut seen: u32 = 0;
        let mut learned = 0;

        while learned < target {
            let page = self
                .backend
                .headlines(&HeadlinesRequest::all_articles(limit, seen))?;
            if page.is_empty() {
                tracing::debug!(
                    learned,
                    wanted = target,
                    "backend history exhausted before learn target"
                );
                break;
            }
            for head in page {
                seen += 1;
                if !head.unread {
                    self.memory.push(head.title);
                    learned += 1;
                }
            }
            tracing::debug!(learned, "learned titles from read articles");
        }

        Ok(learned)
    }

    /// One monitoring pass over the whole unread set.
    ///
    /// Fetches unread pages until an empty one (full coverage regardless
    /// of backend page-size limits), sorts ascending by id, then for each
    /// headline above the cursor: runs the filter and similarity scan,
    /// marks duplicates read (or only reports them in dry-run mode), and
    /// unconditionally appends the title to the window and advances the
    /// cursor. Filtered-out, updated, and duplicate articles all take a
    /// window slot and move the cursor, so later rewordings of them are
    /// still caught and no id is ever reprocessed.
    ///
    /// # Errors
    ///
    /// Returns an error if a fetch or mark-read call fails. State built
    /// up before the failure is kept.
    pub fn run_cycle(&mut self) -> Result<CycleStats> {
        let mut headlines = Vec::new();
        let mut skip: u32 = 0;
        loop {
            let page = self.backend.headlines(&HeadlinesRequest::unread(
                self.last_seen_id,
                PAGE_LIMIT,
                skip,
            ))?;
            skip += PAGE_LIMIT;
            if page.is_empty() {
                break;
            }
            headlines.extend(page);
        }

        headlines.sort_by_key(|head| head.id);

        let mut stats = CycleStats {
            fetched: headlines.len(),
            ..CycleStats::default()
        };

        for head in headlines {
            if head.id <= self.last_seen_id {
                continue;
            }
            stats.processed += 1;

            tracing::debug!(
                id = head.id,
                feed = %head.feed_title,
                title = %head.title,
                "considering"
            );

            if !head.is_updated && self.filter.admit(&head) {
                if let Some((known, score)) = self.find_duplicate(&head.title) {
                    tracing::info!(
                        id = head.id,
                        score,
                        known = %known,
                        feed = %head.feed_title,
                        title = %head.title,
                        "duplicate detected"
                    );
                    if self.dry_run {
                        tracing::info!(id = head.id, "would mark as read");
                    } else {
                        tracing::info!(id = head.id, "marking as read");
                        self.backend.mark_read(head.id)?;
                    }
                    stats.marked += 1;
                } else {
                    tracing::debug!(id = head.id, title = %head.title, "allowing");
                }
            }

            self.memory.push(head.title);
            self.last_seen_id = head.id;
        }

        Ok(stats)
    }

    /// Scans the window in insertion order and short-circuits on the
    /// first entry scoring strictly above the threshold. First match,
    /// not best match: the tie-break is deliberate and observable.
    fn find_duplicate(&self, title: &str) -> Option<(String, u32)> {
        for known in self.memory.iter() {
            let score = token_sort_ratio(known, title);
            if score > self.ratio {
                return Some((known.to_string(), score));
            }
        }
        None
    }

    /// The current cursor position.
    #[must_use]
    pub const fn last_seen_id(&self) -> u64 {
        self.last_seen_id
    }

    /// The title window.
    #[must_use]
    pub const fn memory(&self) -> &TitleMemory {
        &self.memory
    }

    /// The backend, for inspection in tests.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}
