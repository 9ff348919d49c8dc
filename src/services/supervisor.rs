//! Supervising retry loop.
//!
//! Wraps [`DedupEngine::run_cycle`] in a crash-only recovery shell: a
//! failed cycle is logged and immediately re-invoked with no backoff and
//! no retry limit, on the assumption that backend trouble is transient
//! and the engine's cursor keeps a retried cycle from redoing work. The
//! only way out is the shutdown flag, set by the interrupt handler.

use crate::client::NewsBackend;
use crate::services::engine::DedupEngine;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Granularity of the inter-cycle sleep, so an interrupt is noticed
/// promptly even with long configured intervals.
const SLEEP_SLICE: Duration = Duration::from_secs(1);

/// Runs monitoring cycles until `shutdown` is set.
///
/// A successful cycle is followed by the configured sleep; a failed
/// cycle is logged and retried immediately.
pub fn supervise<B: NewsBackend>(
    engine: &mut DedupEngine<B>,
    interval: Duration,
    shutdown: &AtomicBool,
) {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            tracing::info!("interrupt received, stopping");
            return;
        }

        match engine.run_cycle() {
            Ok(stats) => {
                tracing::debug!(
                    fetched = stats.fetched,
                    processed = stats.processed,
                    marked = stats.marked,
                    "cycle complete, sleeping"
                );
                sleep_interruptible(interval, shutdown);
            }
            Err(error) => {
                tracing::warn!(%error, "monitoring cycle failed, retrying");
            }
        }
    }
}

/// Sleeps for `interval`, waking early when `shutdown` is set.
fn sleep_interruptible(interval: Duration, shutdown: &AtomicBool) {
    let mut remaining = interval;
    while !remaining.is_zero() {
        if shutdown.load(Ordering::SeqCst) {
            return;
        }
        let slice = remaining.min(SLEEP_SLICE);
        std::thread::sleep(slice);
        remaining -= slice;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interruptible_sleep_returns_early_on_shutdown() {
        let shutdown = AtomicBool::new(true);
        let start = std::time::Instant::now();
        sleep_interruptible(Duration::from_secs(30), &shutdown);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn zero_interval_sleep_returns_immediately() {
        let shutdown = AtomicBool::new(false);
        sleep_interruptible(Duration::ZERO, &shutdown);
    }
}
