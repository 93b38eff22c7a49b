//! Health check handler and response type.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use ingest_core::constants::BLOB_KEY_PREFIX;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with timeout; returns "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, T, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(_)) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub storage_backend: String,
    pub storage: String,
    pub metadata_backend: String,
    pub metadata: String,
    pub event_publisher: String,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let service = &state.files;

    // Lightweight exists check on an address that is never issued.
    let probe = format!("{}/{}", BLOB_KEY_PREFIX, uuid::Uuid::nil());
    let storage = run_check(TIMEOUT, service.files().exists(&probe), "degraded").await;

    let metadata = match service.metadata() {
        Some(repo) => run_check(TIMEOUT, repo.list_metadata(1, 1), "unhealthy").await,
        None => "not_configured".to_string(),
    };

    // Storage issues don't fail overall health (graceful degradation)
    let healthy = metadata == "healthy" || metadata == "not_configured";

    let status = if healthy { "healthy" } else { "unhealthy" };
    let response = HealthCheckResponse {
        status: status.to_string(),
        storage_backend: service.files().backend_type().to_string(),
        storage,
        metadata_backend: state.config.metadata_backend().to_string(),
        metadata,
        event_publisher: service.events().kind().to_string(),
    };

    if !healthy {
        tracing::warn!(metadata = %response.metadata, "Health check failed");
    }

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
