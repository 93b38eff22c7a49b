//! Test helpers: build AppState and router for integration tests.
//!
//! Every backend is in-process, so no external services are needed.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use ingest_api::setup::routes;
use ingest_api::state::AppState;
use ingest_core::{Config, IngestConfig, MetadataBackend, StorageBackend};
use ingest_db::InMemoryMetadataRepository;
use ingest_infra::NoOpEventPublisher;
use ingest_services::{FileService, MetadataRepository};
use ingest_storage::InMemoryStorage;
use std::sync::Arc;

pub const TEST_API_KEY: &str = "test-api-key-0123456789";

pub struct TestAppOptions {
    pub api_key: Option<&'static str>,
    pub with_metadata: bool,
    pub max_upload_size_bytes: Option<usize>,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            api_key: Some(TEST_API_KEY),
            with_metadata: true,
            max_upload_size_bytes: None,
        }
    }
}

/// Test application: server plus handles on the in-memory backends.
pub struct TestApp {
    pub server: TestServer,
    pub storage: InMemoryStorage,
    pub metadata: Option<InMemoryMetadataRepository>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(TestAppOptions::default())
}

pub fn setup_test_app_with(options: TestAppOptions) -> TestApp {
    let mut ingest = IngestConfig::development("unused");
    ingest.storage_backend = StorageBackend::Memory;
    ingest.metadata_backend = if options.with_metadata {
        MetadataBackend::Memory
    } else {
        MetadataBackend::Disabled
    };
    ingest.base.api_key = options.api_key.map(String::from);
    if let Some(limit) = options.max_upload_size_bytes {
        ingest.base.max_upload_size_bytes = limit;
    }
    let config = Config::new(ingest);

    let storage = InMemoryStorage::new();
    let metadata = options.with_metadata.then(InMemoryMetadataRepository::new);
    let metadata_port = metadata
        .clone()
        .map(|repo| Arc::new(repo) as Arc<dyn MetadataRepository>);

    let service = FileService::new(
        Arc::new(storage.clone()),
        metadata_port,
        Arc::new(NoOpEventPublisher),
    );
    let state = Arc::new(AppState::new(config.clone(), service));

    let router = routes::setup_routes(&config, state).expect("routes");
    let server = TestServer::new(router).expect("test server");

    TestApp {
        server,
        storage,
        metadata,
    }
}

/// Single-file multipart form.
pub fn file_form(file_name: &str, content_type: &str, data: &'static [u8]) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from_static(data))
        .file_name(file_name.to_string())
        .mime_type(content_type.to_string());
    MultipartForm::new().add_part("file", part)
}
