//! Web server exposing the enrichment skill.
//!
//! Routes:
//! - `GET /health` - liveness / readiness probe
//! - `POST /api/enrich_snippet` - search indexer web API skill

mod handlers;
mod routes;

pub use handlers::Health;
pub use routes::create_router;

use std::sync::Arc;

use crate::config::Settings;
use crate::enrich::{EnrichObserver, TracingObserver};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    /// Receives per-request enrichment events.
    pub observer: Arc<dyn EnrichObserver>,
}

impl AppState {
    pub fn new(observer: Arc<dyn EnrichObserver>) -> Self {
        Self { observer }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(TracingObserver))
    }
}

/// Start the web server and run until Ctrl+C.
pub async fn serve(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state, settings);

    let listener = tokio::net::TcpListener::bind((settings.host.as_str(), settings.port)).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::enrich::NoopObserver;

    fn setup_test_app() -> axum::Router {
        create_router(AppState::new(Arc::new(NoopObserver)), &Settings::default())
    }

    async fn post_json(app: axum::Router, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/enrich_snippet")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = setup_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_enrich_snippet_pdf_record() {
        let (status, json) = post_json(
            setup_test_app(),
            r#"{"values": [{"recordId": "1", "data": {"content": "Employees must...", "pageNumber": 3}}]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "values": [{
                    "recordId": "1",
                    "data": {"enriched_snippet": "[Page 3] Employees must..."},
                    "errors": null,
                    "warnings": null
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_enrich_snippet_malformed_body() {
        let (status, json) = post_json(setup_test_app(), "{\"values\": [").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            serde_json::json!({"values": [], "errors": [{"message": "Invalid JSON body"}]})
        );
    }

    #[tokio::test]
    async fn test_enrich_snippet_missing_values() {
        let (status, json) = post_json(setup_test_app(), "{}").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({"values": []}));
    }

    #[tokio::test]
    async fn test_enrich_snippet_without_content_type() {
        let response = setup_test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/enrich_snippet")
                    .body(Body::from(
                        r#"{"values": [{"recordId": "a", "data": {"content": "plain"}}]}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["values"][0]["data"]["enriched_snippet"], "plain");
    }

    #[tokio::test]
    async fn test_body_limit() {
        let settings = Settings {
            body_limit: 16,
            ..Settings::default()
        };
        let app = create_router(AppState::new(Arc::new(NoopObserver)), &settings);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/enrich_snippet")
                    .body(Body::from(format!(
                        r#"{{"values": [{{"data": {{"content": "{}"}}}}]}}"#,
                        "x".repeat(64)
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_enrich_snippet_rejects_get() {
        let response = setup_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/enrich_snippet")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
