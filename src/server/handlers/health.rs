use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Health check endpoint for container orchestration.
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}
