//! blipq – a bounded, blocking, shutdown-aware queue for handing work
//! between threads.
//!
//! This crate exports
//!  * `queue`   – the `BlockingQueue` itself plus its cleanup strategy
//!  * `config`  – TOML/env driven queue and stress settings
//!  * `stress`  – producer/consumer harness used by `blipq-stress`
//!  * `logging` – `tracing` subscriber setup
//!
//! Owners are expected to call [`BlockingQueue::disable_queue`] before tearing
//! a shared queue down, then [`BlockingQueue::destroy_all_data`] to release
//! whatever is still queued.

// ───────────────────────────────────────────────────────────
// Public modules
// ───────────────────────────────────────────────────────────
pub mod config;
pub mod error;
pub mod logging;
pub mod queue;
pub mod stress;

// ───────────────────────────────────────────────────────────
// Re-exports
// ───────────────────────────────────────────────────────────
pub use config::{load_config, Config, QueueConfig, StressConfig};
pub use error::{ConfigError, PushError};
pub use queue::{BlockingQueue, Cleanup, QueueStats};
