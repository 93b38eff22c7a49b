//! Backend wiring and application state setup

use crate::state::AppState;
use anyhow::{Context, Result};
use ingest_core::Config;
use ingest_services::{
    create_event_publisher, create_file_repository, create_metadata_repository, FileService,
};
use std::sync::Arc;

/// Build every backend selected by configuration and wrap them in `AppState`
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let files = create_file_repository(config)
        .await
        .context("Failed to initialize blob storage")?;

    let metadata = create_metadata_repository(config)
        .await
        .context("Failed to initialize metadata store")?;

    let events = create_event_publisher(config)
        .await
        .context("Failed to initialize event publisher")?;

    tracing::info!(
        storage_backend = %files.backend_type(),
        metadata_backend = %config.metadata_backend(),
        event_publisher = %events.kind(),
        "Services initialized"
    );

    let service = FileService::new(files, metadata, events);
    Ok(Arc::new(AppState::new(config.clone(), service)))
}
