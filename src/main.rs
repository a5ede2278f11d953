//! docrelay - document CRUD service with change notifications
//!
//! HTTP endpoints store items and collections in MongoDB and publish the
//! outcome of each request to a Redis channel named
//! `{redis_id}:{verb}:{resource}`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docrelay::bus::RedisEventBus;
use docrelay::store::MongoStore;
use docrelay::{build_router, AppState, Config};

/// Command-line arguments for docrelay
#[derive(Parser, Debug)]
#[command(name = "docrelay")]
#[command(about = "Document CRUD service with change notifications")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000", env = "DOCRELAY_PORT")]
    port: u16,

    /// Document store connection URL
    #[arg(long, default_value = "mongodb://localhost:27017", env = "MONGODB_URL")]
    mongodb_url: String,

    /// Notification bus connection URL
    #[arg(long, default_value = "redis://localhost:6379", env = "REDIS_URL")]
    redis_url: String,

    /// Database used when a request omits `db_name`
    #[arg(long, default_value = "docrelay", env = "DOCRELAY_DEFAULT_DB")]
    default_db: String,

    /// Queue (Redis list) the worker pops jobs from
    #[arg(long, default_value = "docrelay:jobs", env = "DOCRELAY_JOB_QUEUE")]
    job_queue: String,
}

impl Args {
    fn into_config(self) -> Config {
        Config {
            port: self.port,
            mongodb_url: self.mongodb_url,
            redis_url: self.redis_url,
            default_db: self.default_db,
            job_queue: self.job_queue,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docrelay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Args::parse().into_config();

    info!("Starting docrelay v{}", env!("CARGO_PKG_VERSION"));

    let store = MongoStore::connect(&config.mongodb_url)
        .await
        .context("Failed to connect to document store")?;
    info!("Connected to document store at {}", config.mongodb_url);

    let bus = RedisEventBus::connect(&config.redis_url)
        .await
        .context("Failed to connect to notification bus")?;
    info!("Connected to notification bus at {}", config.redis_url);

    let state = AppState::new(Arc::new(store), Arc::new(bus), config.default_db.clone());
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("docrelay listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
