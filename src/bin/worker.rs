//! docrelay-worker - queued-job runner
//!
//! Pops jobs from the configured Redis list and dispatches them against the
//! registered handlers. `process_transcript` is the only registered job and
//! stays a no-op stub.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use docrelay::jobs::{process_transcript, Worker};

/// Command-line arguments for docrelay-worker
#[derive(Parser, Debug)]
#[command(name = "docrelay-worker")]
#[command(about = "Background job runner for docrelay")]
#[command(version)]
struct Args {
    /// Redis connection URL (also the job-queue transport)
    #[arg(long, default_value = "redis://localhost:6379", env = "REDIS_URL")]
    redis_url: String,

    /// Queue (Redis list) to pop jobs from
    #[arg(long, default_value = "docrelay:jobs", env = "DOCRELAY_JOB_QUEUE")]
    job_queue: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docrelay=debug".into()),
        )
        .init();

    let args = Args::parse();
    info!("Starting docrelay-worker v{}", env!("CARGO_PKG_VERSION"));

    let client =
        redis::Client::open(args.redis_url.as_str()).context("Invalid Redis URL")?;

    let worker = Worker::new(args.job_queue).register("process_transcript", |ctx, info| {
        Box::pin(process_transcript(ctx, info))
    });

    tokio::select! {
        result = worker.run(client) => result.context("Worker error")?,
        _ = tokio::signal::ctrl_c() => info!("Received Ctrl+C, shutting down"),
    }

    Ok(())
}
