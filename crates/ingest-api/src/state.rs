//! Application state shared by every handler.

use ingest_core::Config;
use ingest_services::FileService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub files: FileService,
}

impl AppState {
    pub fn new(config: Config, files: FileService) -> Self {
        Self { config, files }
    }
}
