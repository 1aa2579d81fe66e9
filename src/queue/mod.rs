//! blipq queue module.
//!
//! A FIFO guarded by a single mutex, with a condition variable for blocked
//! consumers and atomic control flags for the fast paths.
//!
//! Supports:
//! - Soft capacity limit (`max_len`), with an on/off enforcement switch
//! - One-way shutdown that wakes every blocked consumer
//! - Residual cleanup through a caller supplied [`Cleanup`] strategy
//!
//! Teardown order matters: `disable_queue` first, then `destroy_all_data`.

mod cleanup;
mod stats;

pub use cleanup::Cleanup;
pub use stats::QueueStats;

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace, warn};

use crate::config::QueueConfig;
use crate::error::PushError;
use stats::Counters;

struct Inner<T> {
    items: VecDeque<T>,
    cleanup: Option<Box<dyn Cleanup<T>>>,
    // set by the first rejected push, cleared by the next accepted one
    overflowing: bool,
}

/// Bounded, blocking, multi-producer multi-consumer queue.
///
/// Share it behind an `Arc`. `pop` is the only call that blocks; it returns
/// once an element arrives or the queue is disabled.
pub struct BlockingQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    enabled: AtomicBool,
    enforce_max_len: AtomicBool,
    max_len: AtomicUsize,
    stats: Counters,
}

impl<T> BlockingQueue<T> {
    /// Empty, enabled queue with `max_len = 200` enforced and no cleanup.
    pub fn new() -> Self {
        Self::with_config(&QueueConfig::default())
    }

    pub fn with_config(config: &QueueConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::new(),
                cleanup: None,
                overflowing: false,
            }),
            not_empty: Condvar::new(),
            enabled: AtomicBool::new(true),
            enforce_max_len: AtomicBool::new(config.enforce_max_len),
            max_len: AtomicUsize::new(config.max_len),
            stats: Counters::default(),
        }
    }

    /// Attach the cleanup strategy at construction time.
    pub fn with_cleanup<C>(mut self, cleanup: C) -> Self
    where
        C: Cleanup<T> + 'static,
    {
        self.inner.get_mut().cleanup = Some(Box::new(cleanup));
        self
    }

    /// Register (or replace) the cleanup strategy on a live queue.
    pub fn set_cleanup<C>(&self, cleanup: C)
    where
        C: Cleanup<T> + 'static,
    {
        self.inner.lock().cleanup = Some(Box::new(cleanup));
    }

    pub fn clear_cleanup(&self) {
        self.inner.lock().cleanup = None;
    }

    // ───────────────────────────────────────────────────────
    // State inspection
    // ───────────────────────────────────────────────────────

    /// Snapshot only; stale as soon as it returns under concurrent use.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    pub fn size(&self) -> usize {
        self.inner.lock().items.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size()
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> QueueStats {
        self.stats.snapshot()
    }

    // ───────────────────────────────────────────────────────
    // Capacity configuration
    // ───────────────────────────────────────────────────────

    /// Applies from the next push; already queued elements are kept.
    pub fn set_max_len(&self, max_len: usize) {
        self.max_len.store(max_len, Ordering::Release);
    }

    pub fn get_max_len(&self) -> usize {
        self.max_len.load(Ordering::Acquire)
    }

    pub fn set_max_len_enforced(&self, enforced: bool) {
        self.enforce_max_len.store(enforced, Ordering::Release);
    }

    pub fn is_max_len_enforced(&self) -> bool {
        self.enforce_max_len.load(Ordering::Acquire)
    }

    /// Accept pushes regardless of size from now on.
    pub fn disable_max_len(&self) {
        self.set_max_len_enforced(false);
    }

    // ───────────────────────────────────────────────────────
    // Producer / consumer paths
    // ───────────────────────────────────────────────────────

    /// Append `value` at the tail and wake one consumer.
    ///
    /// Rejection happens only once the current length is strictly greater
    /// than `max_len`, so an enforced queue settles at `max_len + 1`.
    pub fn push(&self, value: T) -> Result<(), PushError<T>> {
        if !self.is_enabled() {
            self.stats.record_disabled();
            return Err(PushError::Disabled(value));
        }

        {
            let mut inner = self.inner.lock();
            // disable_queue flips the flag under this lock
            if !self.is_enabled() {
                self.stats.record_disabled();
                return Err(PushError::Disabled(value));
            }

            let max_len = self.get_max_len();
            if self.is_max_len_enforced() && inner.items.len() > max_len {
                self.stats.record_full();
                let len = inner.items.len();
                if inner.overflowing {
                    trace!(len, max_len, "queue still over max length, dropping value");
                } else {
                    inner.overflowing = true;
                    warn!(len, max_len, "queue over max length, dropping value");
                }
                return Err(PushError::Full(value));
            }

            inner.overflowing = false;
            inner.items.push_back(value);
            self.stats.record_push();
        }

        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove the front element, blocking while the queue is empty and
    /// enabled. Returns `None` once the queue is disabled, even if elements
    /// remain; those are left for [`destroy_all_data`](Self::destroy_all_data).
    pub fn pop(&self) -> Option<T> {
        if !self.is_enabled() {
            return None;
        }

        let mut inner = self.inner.lock();
        self.not_empty.wait_while(&mut inner, |inner| {
            inner.items.is_empty() && self.enabled.load(Ordering::Acquire)
        });

        if !self.is_enabled() {
            return None;
        }

        let value = inner.items.pop_front()?;
        self.stats.record_pop();
        Some(value)
    }

    /// Copy of the front element, or `None` when the queue is empty.
    pub fn peek_front(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.lock().items.front().cloned()
    }

    // ───────────────────────────────────────────────────────
    // Shutdown
    // ───────────────────────────────────────────────────────

    /// Permanently disable the queue and wake every blocked consumer.
    ///
    /// Returns `true` for the call that performed the transition; later calls
    /// are no-ops. Must run before an owner stops waiting on consumers that
    /// may still be parked in `pop`.
    pub fn disable_queue(&self) -> bool {
        let was_enabled = {
            let _inner = self.inner.lock();
            self.enabled.swap(false, Ordering::AcqRel)
        };

        if was_enabled {
            debug!("queue disabled, waking all consumers");
            self.not_empty.notify_all();
        }
        was_enabled
    }

    /// Drain every remaining element through the cleanup strategy, front to
    /// back. Without a strategy this does nothing and returns 0.
    ///
    /// Call after [`disable_queue`](Self::disable_queue) so no producer is
    /// inserting concurrently.
    pub fn destroy_all_data(&self) -> usize {
        let mut inner = self.inner.lock();
        let Inner { items, cleanup, .. } = &mut *inner;
        let Some(cleanup) = cleanup.as_mut() else {
            return 0;
        };

        let mut destroyed = 0;
        while let Some(value) = items.pop_front() {
            cleanup.cleanup(value);
            destroyed += 1;
        }
        drop(inner);

        self.stats.record_destroyed(destroyed as u64);
        if destroyed > 0 {
            debug!(destroyed, "destroyed residual queue data");
        }
        destroyed
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for BlockingQueue<T> {
    fn drop(&mut self) {
        self.disable_queue();
        self.destroy_all_data();
    }
}

impl<T> fmt::Debug for BlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingQueue")
            .field("len", &self.size())
            .field("enabled", &self.is_enabled())
            .field("enforce_max_len", &self.is_max_len_enforced())
            .field("max_len", &self.get_max_len())
            .finish()
    }
}
