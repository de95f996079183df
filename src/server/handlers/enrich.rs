//! Web API skill endpoint.

use axum::{body::Bytes, extract::State, Json};

use super::super::AppState;
use crate::enrich::{enrich_body, EnrichmentResponse};
use crate::error::EnrichError;

/// Prepend `[Page N] ` to each snippet that carries a page number.
///
/// Reads raw bytes: no `Content-Type` is required, and a malformed body is
/// answered with the skill's error envelope instead of axum's rejection.
pub async fn enrich_snippet(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EnrichmentResponse>, EnrichError> {
    enrich_body(&body, state.observer.as_ref()).map(Json)
}
