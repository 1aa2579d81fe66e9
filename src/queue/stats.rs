use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of a queue's counters. Diagnostics only; the fields are
/// read independently and may not add up while producers are running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    pub pushed: u64,
    pub popped: u64,
    pub rejected_full: u64,
    pub rejected_disabled: u64,
    pub destroyed: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pushed: AtomicU64,
    popped: AtomicU64,
    rejected_full: AtomicU64,
    rejected_disabled: AtomicU64,
    destroyed: AtomicU64,
}

impl Counters {
    #[inline]
    pub(crate) fn record_push(&self) {
        self.pushed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_pop(&self) {
        self.popped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_full(&self) {
        self.rejected_full.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_disabled(&self) {
        self.rejected_disabled.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_destroyed(&self, n: u64) {
        self.destroyed.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> QueueStats {
        QueueStats {
            pushed: self.pushed.load(Ordering::Relaxed),
            popped: self.popped.load(Ordering::Relaxed),
            rejected_full: self.rejected_full.load(Ordering::Relaxed),
            rejected_disabled: self.rejected_disabled.load(Ordering::Relaxed),
            destroyed: self.destroyed.load(Ordering::Relaxed),
        }
    }
}
