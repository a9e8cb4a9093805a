//! Common test harness for the API integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use frontdesk_api::{app, AppState, RateLimiter};
use frontdesk_mail::MailDispatcher;
use frontdesk_storage::EnquiryStore;

/// A fully wired router over an in-memory database and a disabled
/// mailer, plus request helpers that decode JSON bodies.
pub struct TestHarness {
    pub app: Router,
}

impl TestHarness {
    /// Harness with a rate limit high enough to never interfere.
    pub async fn new() -> Self {
        Self::with_rate_limit(1000).await
    }

    /// Harness with a custom per-IP request budget.
    pub async fn with_rate_limit(max: usize) -> Self {
        let store = EnquiryStore::in_memory().await.expect("in-memory store");
        let mailer = Arc::new(MailDispatcher::disabled());
        let state = AppState::new(store, mailer, false);
        let limiter = RateLimiter::new(max, Duration::from_secs(15 * 60));
        let origins = vec!["http://localhost:5500".to_string()];
        Self {
            app: app(state, limiter, &origins),
        }
    }

    /// Sends a request and returns status plus decoded JSON body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router never errors");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is JSON")
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds");
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds");
        self.send(request).await
    }

    pub async fn patch_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("PATCH")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds");
        self.send(request).await
    }

    /// Submits a valid enquiry and returns its id.
    pub async fn submit(&self, body: &Value) -> i64 {
        let (status, response) = self.post_json("/api/enquiries/submit", body).await;
        assert_eq!(status, StatusCode::CREATED, "submit failed: {response}");
        response["enquiryId"].as_i64().expect("enquiryId is an integer")
    }
}

/// A well-formed submission body.
pub fn submission(name: &str, subject: &str) -> Value {
    json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "subject": subject,
        "message": "Please get in touch about an audit.",
    })
}
