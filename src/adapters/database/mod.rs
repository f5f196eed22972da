pub mod notice_repo;
pub mod records;

pub use notice_repo::PgNoticeRepository;

use crate::config::DatabaseConfig;
use backon::{ExponentialBuilder, Retryable};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;

pub type DbPool = Pool<Postgres>;

/// Initializes the database connection pool.
///
/// # Errors
/// Returns `sqlx::Error` if the connection fails.
pub async fn init_pool(config: &DatabaseConfig, url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(url)
        .await
}

/// Initializes the pool, retrying with exponential backoff while the database is unreachable.
///
/// # Errors
/// Returns the last `sqlx::Error` once the retry budget is spent.
pub async fn connect_with_retry(config: &DatabaseConfig, url: &str) -> Result<DbPool, sqlx::Error> {
    let retry_strategy = ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(250))
        .with_max_delay(Duration::from_secs(5))
        .with_max_times(config.connect_retries);

    (|| init_pool(config, url))
        .retry(retry_strategy)
        .when(|e| matches!(e, sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::Tls(_)))
        .notify(|e, delay| {
            tracing::warn!(error = %e, delay_ms = %delay.as_millis(), "Database unavailable, retrying...");
        })
        .await
}
