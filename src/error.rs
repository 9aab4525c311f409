use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Handler-boundary error: an upstream failure tagged with the endpoint's
/// error label. Rendered as `{error, message}` with status 500; nothing
/// propagates past the handler.
#[derive(Debug, Error)]
#[error("{label}: {source}")]
pub struct ApiError {
    pub label: &'static str,
    #[source]
    pub source: UpstreamError,
}

impl ApiError {
    pub fn new(label: &'static str, source: UpstreamError) -> Self {
        Self { label, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.label,
            "message": self.source.to_string(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
