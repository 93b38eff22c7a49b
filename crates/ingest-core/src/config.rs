//! Configuration module
//!
//! Environment-driven configuration for the HTTP server and the three
//! backend families (blob storage, metadata store, event publisher).

use std::env;

use crate::storage_types::{EventPublisherKind, MetadataBackend, StorageBackend};

// Common constants
const SERVER_PORT: u16 = 8080;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_UPLOAD_SIZE_MB: usize = 100;
const LOCAL_STORAGE_PATH: &str = "./data/files";
const LOCAL_STORAGE_BASE_URL: &str = "http://localhost:8080/blobs";

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: String,
    /// Shared secret for the X-API-KEY check; `None` disables the check.
    pub api_key: Option<String>,
    pub max_upload_size_bytes: usize,
}

/// Backend configuration for the ingestion service
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub base: BaseConfig,
    // Blob storage
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: String,
    pub local_storage_base_url: String,
    // Metadata store
    pub metadata_backend: MetadataBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Event publisher
    pub event_publisher: EventPublisherKind,
    pub sqs_queue_url: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<IngestConfig>);

impl Config {
    fn as_ingest(&self) -> &IngestConfig {
        &self.0
    }

    pub fn new(config: IngestConfig) -> Self {
        Config(Box::new(config))
    }

    /// Load `.env` (if present) and read configuration from the environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = IngestConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_ingest().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_ingest().base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.as_ingest().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_ingest().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_ingest().base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.as_ingest().base.log_format
    }

    pub fn api_key(&self) -> Option<&str> {
        self.as_ingest().base.api_key.as_deref()
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_ingest().base.max_upload_size_bytes
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_ingest().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_ingest().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_ingest().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_ingest().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_ingest().aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> &str {
        &self.as_ingest().local_storage_path
    }

    pub fn local_storage_base_url(&self) -> &str {
        &self.as_ingest().local_storage_base_url
    }

    pub fn metadata_backend(&self) -> MetadataBackend {
        self.as_ingest().metadata_backend
    }

    pub fn database_url(&self) -> Option<&str> {
        self.as_ingest().database_url.as_deref()
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_ingest().db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_ingest().db_timeout_seconds
    }

    pub fn event_publisher(&self) -> EventPublisherKind {
        self.as_ingest().event_publisher
    }

    pub fn sqs_queue_url(&self) -> Option<&str> {
        self.as_ingest().sqs_queue_url.as_deref()
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "compact".to_string())
                .to_lowercase(),
            api_key: non_empty("API_KEY"),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
        };

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| StorageBackend::Local.to_string())
            .parse::<StorageBackend>()?;
        let metadata_backend = env::var("METADATA_BACKEND")
            .unwrap_or_else(|_| MetadataBackend::Memory.to_string())
            .parse::<MetadataBackend>()?;
        let event_publisher = env::var("EVENT_PUBLISHER")
            .unwrap_or_else(|_| EventPublisherKind::NoOp.to_string())
            .parse::<EventPublisherKind>()?;

        let config = IngestConfig {
            base,
            storage_backend,
            s3_bucket: non_empty("S3_BUCKET"),
            s3_region: non_empty("S3_REGION"),
            s3_endpoint: non_empty("S3_ENDPOINT"),
            aws_region: non_empty("AWS_REGION"),
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| LOCAL_STORAGE_PATH.to_string()),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL")
                .unwrap_or_else(|_| LOCAL_STORAGE_BASE_URL.to_string()),
            metadata_backend,
            database_url: non_empty("DATABASE_URL"),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            event_publisher,
            sqs_queue_url: non_empty("SQS_QUEUE_URL"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Development defaults: local filesystem blobs, in-memory metadata, no-op events.
    pub fn development(local_storage_path: impl Into<String>) -> Self {
        IngestConfig {
            base: BaseConfig {
                server_port: SERVER_PORT,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                log_format: "compact".to_string(),
                api_key: None,
                max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            },
            storage_backend: StorageBackend::Local,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: local_storage_path.into(),
            local_storage_base_url: LOCAL_STORAGE_BASE_URL.to_string(),
            metadata_backend: MetadataBackend::Memory,
            database_url: None,
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            event_publisher: EventPublisherKind::NoOp,
            sqs_queue_url: None,
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.log_format != "compact" && self.base.log_format != "json" {
            return Err(anyhow::anyhow!("LOG_FORMAT must be 'compact' or 'json'"));
        }

        if self.base.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.trim().is_empty() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.trim().is_empty() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
            StorageBackend::Memory => {}
        }

        if self.metadata_backend == MetadataBackend::Postgres {
            match self.database_url.as_deref() {
                None => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be set when using postgres metadata backend"
                    ));
                }
                Some(url) if !url.starts_with("postgres://") && !url.starts_with("postgresql://") => {
                    return Err(anyhow::anyhow!(
                        "DATABASE_URL must be a valid PostgreSQL connection string"
                    ));
                }
                Some(_) => {}
            }
        }

        if self.event_publisher == EventPublisherKind::Sqs && self.sqs_queue_url.is_none() {
            return Err(anyhow::anyhow!(
                "SQS_QUEUE_URL must be set when EVENT_PUBLISHER=sqs"
            ));
        }

        Ok(())
    }
}
