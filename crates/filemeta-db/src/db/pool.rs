//! Database connection pool setup.

use anyhow::{Context, Result};
use filemeta_core::{Config, DatabaseConfig};
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;

/// Migrations under the workspace `migrations/` directory, embedded at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Translate the configured database settings into connect options.
pub fn connect_options(database: &DatabaseConfig) -> Result<PgConnectOptions> {
    let options = match database {
        DatabaseConfig::Url(url) => url
            .parse::<PgConnectOptions>()
            .context("DATABASE_URL is not a valid PostgreSQL connection string")?,
        DatabaseConfig::Parts {
            host,
            port,
            name,
            user,
            password,
        } => PgConnectOptions::new()
            .host(host)
            .port(*port)
            .database(name)
            .username(user)
            .password(password),
    };
    Ok(options)
}

/// Create the connection pool and check that the database is reachable.
///
/// An unreachable database is an error here, so the service never starts
/// without a working connection.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let options = connect_options(&config.database)?;
    connect_with_options(
        options,
        config.db_max_connections,
        Duration::from_secs(config.db_timeout_seconds),
    )
    .await
}

pub async fn connect_with_options(
    options: PgConnectOptions,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(max_connections, "Database connected successfully");
    Ok(pool)
}
