//! Producer/consumer stress harness.
//!
//! Producers push `(producer, seq)` tokens until the deadline; consumers block
//! in `pop` until the queue is disabled. Afterwards the residue is drained
//! through a counting cleanup so the run can be checked for lost or
//! duplicated elements.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::{QueueConfig, StressConfig};
use crate::queue::BlockingQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub producer: usize,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StressReport {
    pub pushed: u64,
    pub rejected: u64,
    pub popped: u64,
    pub residual: u64,
    /// Tokens a consumer saw out of order for their producer.
    pub order_violations: u64,
    pub elapsed: Duration,
}

impl StressReport {
    /// Every accepted token was either consumed or drained, exactly once.
    pub fn is_conserved(&self) -> bool {
        self.popped + self.residual == self.pushed
    }

    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.popped as f64 / secs
        }
    }
}

#[derive(Debug, Default)]
struct ProducerTally {
    pushed: u64,
    rejected: u64,
}

#[derive(Debug, Default)]
struct ConsumerTally {
    popped: u64,
    order_violations: u64,
}

pub fn run(queue_cfg: &QueueConfig, stress_cfg: &StressConfig) -> anyhow::Result<StressReport> {
    anyhow::ensure!(stress_cfg.producers > 0, "at least one producer is required");
    anyhow::ensure!(stress_cfg.consumers > 0, "at least one consumer is required");

    let residual = Arc::new(AtomicU64::new(0));
    let residual_sink = Arc::clone(&residual);
    let queue = Arc::new(
        BlockingQueue::<Token>::with_config(queue_cfg).with_cleanup(move |_token: Token| {
            residual_sink.fetch_add(1, Ordering::Relaxed);
        }),
    );

    info!(
        producers = stress_cfg.producers,
        consumers = stress_cfg.consumers,
        max_len = queue_cfg.max_len,
        enforce = queue_cfg.enforce_max_len,
        "starting stress run"
    );

    let start = Instant::now();
    let deadline = start + stress_cfg.duration;

    let consumers = (0..stress_cfg.consumers)
        .map(|id| {
            let q = Arc::clone(&queue);
            thread::Builder::new()
                .name(format!("blipq-consumer-{id}"))
                .spawn(move || consume(&q))
        })
        .collect::<Result<Vec<_>, _>>();

    let producers = (0..stress_cfg.producers)
        .map(|id| {
            let q = Arc::clone(&queue);
            thread::Builder::new()
                .name(format!("blipq-producer-{id}"))
                .spawn(move || produce(&q, id, deadline))
        })
        .collect::<Result<Vec<_>, _>>();

    // threads that did start must not stay parked in pop
    let (consumers, producers) = match (consumers, producers) {
        (Ok(c), Ok(p)) => (c, p),
        (Err(e), _) | (_, Err(e)) => {
            queue.disable_queue();
            return Err(e.into());
        }
    };

    thread::sleep(deadline.saturating_duration_since(Instant::now()));
    queue.disable_queue();

    let mut report = StressReport::default();
    for handle in producers {
        let tally = handle
            .join()
            .map_err(|_| anyhow::anyhow!("producer thread panicked"))?;
        report.pushed += tally.pushed;
        report.rejected += tally.rejected;
    }
    for handle in consumers {
        let tally = handle
            .join()
            .map_err(|_| anyhow::anyhow!("consumer thread panicked"))?;
        report.popped += tally.popped;
        report.order_violations += tally.order_violations;
    }

    queue.destroy_all_data();
    report.residual = residual.load(Ordering::Relaxed);
    report.elapsed = start.elapsed();

    info!(
        pushed = report.pushed,
        rejected = report.rejected,
        popped = report.popped,
        residual = report.residual,
        order_violations = report.order_violations,
        elapsed = ?report.elapsed,
        "stress run finished"
    );
    Ok(report)
}

fn produce(queue: &BlockingQueue<Token>, producer: usize, deadline: Instant) -> ProducerTally {
    let mut tally = ProducerTally::default();
    let mut seq = 0u64;
    while Instant::now() < deadline {
        match queue.push(Token { producer, seq }) {
            Ok(()) => {
                tally.pushed += 1;
                seq += 1;
            }
            Err(e) if e.is_disabled() => break,
            Err(_) => tally.rejected += 1,
        }
    }
    debug!(producer, pushed = tally.pushed, "producer done");
    tally
}

fn consume(queue: &BlockingQueue<Token>) -> ConsumerTally {
    let mut tally = ConsumerTally::default();
    let mut last_seen: HashMap<usize, u64> = HashMap::new();
    while let Some(token) = queue.pop() {
        tally.popped += 1;
        if let Some(prev) = last_seen.insert(token.producer, token.seq) {
            if token.seq <= prev {
                tally.order_violations += 1;
            }
        }
    }
    tally
}
