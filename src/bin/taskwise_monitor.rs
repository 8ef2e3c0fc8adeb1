//! Runs the deadline monitor against `PostgreSQL` and Telegram.
//!
//! Usage:
//!
//! ```text
//! BOT_TOKEN=... DATABASE_URL=postgres://... taskwise-monitor
//! ```
//!
//! The monitor sweeps for tasks due within the lookahead window on every
//! interval tick and stops on Ctrl+C. See [`taskwise::config::AppConfig`] for
//! every recognised setting.

use diesel::r2d2::PoolError;
use mockable::DefaultClock;
use std::future::Future;
use std::sync::Arc;
use taskwise::config::{AppConfig, ConfigError};
use taskwise::scheduling::adapters::TelegramDispatcher;
use taskwise::scheduling::ports::DispatchError;
use taskwise::scheduling::services::DeadlineMonitor;
use taskwise::task::adapters::postgres::PostgresTaskStore;
use thiserror::Error;
use tokio::runtime::Builder;

const POOL_SIZE: u32 = 4;

/// Errors that stop the monitor before it starts sweeping.
#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("database pool could not be created: {0}")]
    Pool(#[from] PoolError),
    #[error("dispatcher could not be created: {0}")]
    Dispatcher(#[from] DispatchError),
    #[error("runtime init failed: {0}")]
    Runtime(#[source] std::io::Error),
}

fn main() -> Result<(), StartupError> {
    taskwise::telemetry::init();
    let config = AppConfig::from_env()?;
    let store = PostgresTaskStore::connect(&config.database_url, POOL_SIZE)?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;
    runtime.block_on(run(&config, store))
}

async fn run(config: &AppConfig, store: PostgresTaskStore) -> Result<(), StartupError> {
    let dispatcher = TelegramDispatcher::new(&config.telegram)?;
    let monitor = DeadlineMonitor::new(
        Arc::new(store),
        Arc::new(dispatcher),
        Arc::new(DefaultClock),
        config.monitor,
    );

    tracing::info!(
        interval_secs = monitor.config().interval.as_secs(),
        lookahead_hours = monitor.config().lookahead.num_hours(),
        "deadline monitor starting"
    );
    monitor.run(until_signal(tokio::signal::ctrl_c())).await;
    Ok(())
}

/// Resolves when `signal` fires.
///
/// A listener that cannot be installed never resolves, so the monitor keeps
/// sweeping until the process is killed.
async fn until_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
