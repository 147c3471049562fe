//! Placeholder greeter agent service.
//!
//! Mirrors the `agent_hello` contract: a message endpoint that answers with a
//! static greeting, a Prometheus-text metrics endpoint, and a liveness
//! endpoint. The request counter is the only shared mutable state and is
//! incremented atomically.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared state for the greeter service.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    request_count: Arc<AtomicU64>,
}

impl AppState {
    /// Current value of the request counter.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }
}

/// Incoming message payload. The `data` field must be a JSON object;
/// anything else is rejected before the handler runs.
#[derive(Debug, Deserialize)]
pub struct Message {
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Greeting response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HelloResponse {
    pub response: String,
}

/// Liveness response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Build the greeter router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/hello.request", post(hello_handler))
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(health_handler))
        .with_state(state)
}

/// POST /hello.request
///
/// Counts the request and returns the fixed greeting.
async fn hello_handler(
    State(state): State<AppState>,
    Json(message): Json<Message>,
) -> Json<HelloResponse> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    tracing::info!(payload = ?message.data, "received message on 'hello.request'");

    Json(HelloResponse {
        response: "Hello, world!".to_string(),
    })
}

/// GET /metrics
///
/// Prometheus text exposition of the request counter.
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.request_count();
    let body = format!(
        "# HELP hello_request_count Count of hello requests received\n\
         # TYPE hello_request_count counter\n\
         hello_request_count {count}\n"
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

/// GET /healthz
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Bind and serve the greeter until the process is terminated.
pub async fn serve(bind_address: &str, port: u16) -> std::io::Result<()> {
    let addr = format!("{bind_address}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "greeter service listening");
    axum::serve(listener, create_router(AppState::default())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn hello_request(payload: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/hello.request")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_hello_returns_greeting() {
        let state = AppState::default();
        let app = create_router(state);

        let response = app
            .oneshot(hello_request(r#"{"data": {"from": "tester"}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let hello: HelloResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(hello.response, "Hello, world!");
    }

    #[tokio::test]
    async fn test_counter_increments_once_per_request() {
        let state = AppState::default();
        let app = create_router(state.clone());

        for expected in 1..=3u64 {
            app.clone()
                .oneshot(hello_request(r#"{"data": {}}"#))
                .await
                .unwrap();
            assert_eq!(state.request_count(), expected);
        }
    }

    #[tokio::test]
    async fn test_rejected_payload_does_not_count() {
        let state = AppState::default();
        let app = create_router(state.clone());

        // data must be a mapping
        let response = app
            .clone()
            .oneshot(hello_request(r#"{"data": 5}"#))
            .await
            .unwrap();
        assert!(response.status().is_client_error());

        // not JSON at all
        let response = app.oneshot(hello_request("not json")).await.unwrap();
        assert!(response.status().is_client_error());

        assert_eq!(state.request_count(), 0);
    }

    #[tokio::test]
    async fn test_metrics_reflects_counter() {
        let state = AppState::default();
        let app = create_router(state.clone());

        app.clone()
            .oneshot(hello_request(r#"{"data": {}}"#))
            .await
            .unwrap();
        app.clone()
            .oneshot(hello_request(r#"{"data": {}}"#))
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("# TYPE hello_request_count counter"));
        assert!(text.contains("hello_request_count 2\n"));
    }

    #[tokio::test]
    async fn test_healthz_independent_of_counter() {
        let state = AppState::default();
        let app = create_router(state);

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/healthz")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = axum::body::to_bytes(response.into_body(), 1024)
                .await
                .unwrap();
            let health: HealthResponse = serde_json::from_slice(&body).unwrap();
            assert_eq!(health.status, "ok");
        }
    }
}
