//! Database setup and metadata backend selection

use crate::db::{InMemoryMetadataRepository, MetadataRepository, PgMetadataRepository};
use anyhow::{Context, Result};
use ingest_core::{Config, MetadataBackend};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Connect the pool and run pending migrations
pub async fn setup_database(database_url: &str, config: &Config) -> Result<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "Database connected successfully"
    );

    // Workspace migrations/ relative to this crate
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Create the metadata backend selected by configuration.
///
/// `METADATA_BACKEND=none` yields `None`: uploads then carry no metadata id.
pub async fn create_metadata_repository(
    config: &Config,
) -> Result<Option<Arc<dyn MetadataRepository>>> {
    let backend = config.metadata_backend();
    tracing::info!(backend = %backend, "Initializing metadata store");

    match backend {
        MetadataBackend::Postgres => {
            let url = config
                .database_url()
                .context("DATABASE_URL not configured")?;
            let pool = setup_database(url, config).await?;
            Ok(Some(Arc::new(PgMetadataRepository::new(pool))))
        }
        MetadataBackend::Memory => Ok(Some(Arc::new(InMemoryMetadataRepository::new()))),
        MetadataBackend::Disabled => Ok(None),
    }
}
