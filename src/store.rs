//! PostgreSQL connection setup with a bounded wait.

use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound on establishing the first connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Parse a connection string without touching the network.
pub fn parse_database_url(url: &str) -> Result<PgConnectOptions, ConfigError> {
    PgConnectOptions::from_str(url).map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))
}

/// Open a pool and ping it. Fails with `PoolTimedOut` when the server does not answer
/// within `timeout`.
pub async fn connect(
    options: PgConnectOptions,
    max_connections: u32,
    timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        host = options.get_host(),
        database = options.get_database().unwrap_or_default(),
        "connecting to database"
    );
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(timeout)
        .connect_with(options)
        .await?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(pool)
}
