//! Dedup engine and its collaborators.
//!
//! The engine orchestrates the leaf services: the similarity scorer, the
//! bounded title window, and the feed filter. The supervisor wraps the
//! engine's monitoring cycle in the retry-forever shell.

mod engine;
mod filter;
mod memory;
mod similarity;
mod supervisor;

pub use engine::{CycleStats, DedupEngine};
pub use filter::FeedFilter;
pub use memory::TitleMemory;
pub use similarity::token_sort_ratio;
pub use supervisor::supervise;
