//! Error types for the enrichment API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::enrich::EnrichmentResponse;

/// Diagnostic returned to callers for any request that is not a batch.
pub const INVALID_JSON_BODY: &str = "Invalid JSON body";

/// A request body that cannot be processed as a batch of records.
///
/// Every variant is reported to the caller identically; the variants only
/// differ in what gets logged.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("body must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("`values` must be an array, found {0}")]
    ValuesNotArray(&'static str),
}

impl EnrichError {
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Response envelope sent to the caller.
    pub fn to_response(&self) -> EnrichmentResponse {
        EnrichmentResponse::rejected(INVALID_JSON_BODY)
    }
}

impl IntoResponse for EnrichError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_response())).into_response()
    }
}
