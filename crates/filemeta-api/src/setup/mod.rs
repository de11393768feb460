//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;

use crate::constants::SERVICE_NAME;
use crate::state::AppState;
use anyhow::Result;
use filemeta_core::{Config, MetadataBuilder};
use filemeta_db::FileMetadataRepository;
use filemeta_infra::{init_telemetry, TelemetryConfig};
use std::sync::Arc;

/// Initialize telemetry, the database, and the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let telemetry = TelemetryConfig {
        format: config
            .log_format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?,
        service_name: SERVICE_NAME.to_string(),
        environment: config.environment.clone(),
    };
    init_telemetry(&telemetry)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;

    let builder = MetadataBuilder::default().with_max_name_length(config.max_file_name_length);
    let store = Arc::new(FileMetadataRepository::new(pool));
    let state = Arc::new(AppState::new(config.clone(), store, builder));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
