//! Route configuration and setup.
//!
//! File routes sit behind the API key check; `/health`, `/docs` and the
//! OpenAPI document are public.

mod health;

use crate::auth::{api_key_middleware, ApiKeyAuth};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use ingest_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    crate::error::set_production_mode(config.is_production());
    let auth = ApiKeyAuth::new(config.api_key().map(String::from));
    if !auth.is_enabled() {
        tracing::warn!("API_KEY not set - file routes are open to anyone");
    }

    let protected_routes = protected_routes().layer(axum::middleware::from_fn_with_state(
        Arc::new(auth),
        api_key_middleware,
    ));

    let app = public_routes()
        .merge(protected_routes)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(DefaultBodyLimit::max(config.max_upload_size_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!(
        max_upload_size_mb = config.max_upload_size_bytes() / 1024 / 1024,
        "Routes configured"
    );

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

/// Public routes (no authentication required)
fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

/// File routes (require the X-API-KEY header when a key is configured)
fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/files",
            get(handlers::file_get::list_files).post(handlers::file_upload::upload_file),
        )
        .route(
            "/files/{id}",
            get(handlers::file_get::get_file).delete(handlers::file_delete::delete_file),
        )
}
