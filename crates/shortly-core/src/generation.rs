// ── Request generation guard ──
//
// Each controller stamps a fetch with the next generation when it is
// issued. When the response lands, it is applied only if no newer fetch
// (or a close) has bumped the counter since. Last request issued wins.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct Generation(AtomicU64);

impl Generation {
    /// Start a new generation, superseding every earlier one.
    pub(crate) fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}
