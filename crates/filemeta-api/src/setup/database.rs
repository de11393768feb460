//! Database setup and initialization

use anyhow::{Context, Result};
use filemeta_core::Config;
use filemeta_db::MIGRATOR;
use sqlx::PgPool;

/// Connect the pool and, unless disabled, apply pending migrations.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let pool = filemeta_db::connect(config).await?;

    if config.run_migrations {
        MIGRATOR
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    } else {
        tracing::info!("Skipping database migrations (RUN_MIGRATIONS=false)");
    }

    Ok(pool)
}
