use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use ingest_core::constants::API_KEY_HEADER;
use ingest_core::AppError;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Expected `X-API-KEY` value. `None` (or empty) disables the check.
#[derive(Clone, Debug)]
pub struct ApiKeyAuth {
    api_key: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Check a presented header value against the configured key.
    pub fn check(&self, presented: Option<&[u8]>) -> Result<(), AppError> {
        let Some(ref expected) = self.api_key else {
            return Ok(());
        };

        match presented {
            None | Some([]) => Err(AppError::Unauthorized("Missing API Key".to_string())),
            Some(value) if secure_compare(value, expected.as_bytes()) => Ok(()),
            Some(_) => Err(AppError::Forbidden("Invalid API Key".to_string())),
        }
    }
}

/// Constant-time comparison of two byte strings
fn secure_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

pub async fn api_key_middleware(
    State(auth): State<Arc<ApiKeyAuth>>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|value| value.as_bytes());

    if let Err(e) = auth.check(presented) {
        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            reason = %e,
            "API key check failed"
        );
        return HttpAppError(e).into_response();
    }

    next.run(request).await
}
