//! API integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusBuilder;
use tower::ServiceExt;

use sentra_api::{create_router, ApiConfig, AppState};

fn test_router(metrics: bool) -> axum::Router {
    let state = AppState::new(ApiConfig::default());
    // build_recorder avoids installing a process-global recorder in tests.
    let handle = metrics.then(|| PrometheusBuilder::new().build_recorder().handle());
    create_router(state, handle)
}

/// Test health endpoint.
#[tokio::test]
async fn test_health_endpoint() {
    let app = test_router(false);

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
    assert_eq!(json["status"], "healthy");
}

/// Health alias used by probes.
#[tokio::test]
async fn test_healthz_alias() {
    let app = test_router(false);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// Test metrics endpoint (when enabled).
#[tokio::test]
async fn test_metrics_endpoint() {
    let app = test_router(true);

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
}

/// Metrics route is absent when disabled.
#[tokio::test]
async fn test_metrics_disabled() {
    let app = test_router(false);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Unknown routes 404.
#[tokio::test]
async fn test_unknown_route() {
    let app = test_router(false);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
