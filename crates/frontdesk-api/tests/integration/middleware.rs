//! Integration tests for the cross-cutting layers: health, 404
//! fallback, rate limiting, and response headers.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use crate::common::TestHarness;

#[tokio::test]
async fn test_health_endpoint_shape() {
    let harness = TestHarness::new().await;

    let (status, body) = harness.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Frontdesk Enquiry API");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unmatched_route_returns_json_404() {
    let harness = TestHarness::new().await;

    let (status, body) = harness.get("/api/no-such-route").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");

    let (status, body) = harness.get("/outside-prefix").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn test_rate_limit_rejects_over_budget() {
    let harness = TestHarness::with_rate_limit(3).await;

    for _ in 0..3 {
        let (status, _) = harness.get("/api/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = harness.get("/api/health").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body["error"],
        "Too many requests from this IP, please try again later."
    );
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let harness = TestHarness::new().await;

    let response = harness
        .app
        .clone()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
}

#[tokio::test]
async fn test_cors_allows_listed_origin() {
    let harness = TestHarness::new().await;

    let response = harness
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "http://localhost:5500")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5500"
    );
}

#[tokio::test]
async fn test_cors_omits_header_for_unlisted_origin() {
    let harness = TestHarness::new().await;

    let response = harness
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "http://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
