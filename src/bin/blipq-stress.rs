//! blipq-stress – hammer a `BlockingQueue` with producer and consumer threads
//! and check that nothing was lost or duplicated.
//
//  $ blipq-stress --config blipq.toml
//  $ blipq-stress --producers 8 --consumers 2 --duration-ms 5000 --unbounded
use std::time::Duration;

use blipq::logging::init_logging;
use blipq::{stress, Config};

use clap::Parser;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "blipq-stress", version, about = "blipq producer/consumer stress driver")]
struct Cli {
    /// Path to config TOML (env BLIPQ_CONFIG is used when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Number of producer threads
    #[arg(short, long)]
    producers: Option<usize>,

    /// Number of consumer threads
    #[arg(short = 'C', long)]
    consumers: Option<usize>,

    /// How long producers keep pushing
    #[arg(short, long)]
    duration_ms: Option<u64>,

    /// Soft capacity of the queue
    #[arg(short, long)]
    max_len: Option<usize>,

    /// Turn capacity enforcement off
    #[arg(long)]
    unbounded: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(n) = cli.producers {
        cfg.stress.producers = n;
    }
    if let Some(n) = cli.consumers {
        cfg.stress.consumers = n;
    }
    if let Some(ms) = cli.duration_ms {
        cfg.stress.duration = Duration::from_millis(ms);
    }
    if let Some(n) = cli.max_len {
        cfg.queue.max_len = n;
    }
    if cli.unbounded {
        cfg.queue.enforce_max_len = false;
    }

    let report = stress::run(&cfg.queue, &cfg.stress)?;
    println!(
        "pushed={} rejected={} popped={} residual={} order_violations={} elapsed={:?} throughput={:.2} items/s",
        report.pushed,
        report.rejected,
        report.popped,
        report.residual,
        report.order_violations,
        report.elapsed,
        report.throughput()
    );

    if !report.is_conserved() || report.order_violations > 0 {
        error!(?report, "stress run failed its invariants");
        anyhow::bail!("stress run lost, duplicated or reordered elements");
    }
    Ok(())
}
