//! IP-scoped sliding-window rate limiting.
//!
//! `RateLimitLayer` and `RateLimitService` wrap any inner service with a
//! per-client request budget. The limiter itself is an owned, injected
//! instance so tests can run with tiny budgets.

use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::response::IntoResponse;
use axum::Json;
use http::{Request, StatusCode};
use serde_json::json;
use tower::{Layer, Service};
use tracing::warn;

use crate::extract::client_ip;

/// Message returned with every 429.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Length of the sliding window.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Sliding-window hit counter keyed by client IP.
///
/// Cheap to clone (Arc internals). Each key holds the timestamps of its
/// requests inside the window; entries outside the window are pruned as
/// it slides.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<RateLimiterInner>,
}

struct RateLimiterInner {
    max: usize,
    window: Duration,
    hits: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max` requests per key per `window`.
    pub fn new(max: usize, window: Duration) -> Self {
        Self {
            inner: Arc::new(RateLimiterInner {
                max,
                window,
                hits: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Records a hit for `key` and reports whether it fits the budget.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut hits = self
            .inner
            .hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = hits.entry(key.to_string()).or_default();
        while entry
            .front()
            .is_some_and(|t| now.duration_since(*t) >= self.inner.window)
        {
            entry.pop_front();
        }
        if entry.len() >= self.inner.max {
            false
        } else {
            entry.push_back(now);
            true
        }
    }
}

/// Tower `Layer` that wraps services with the rate limiter.
#[derive(Clone)]
pub struct RateLimitLayer {
    limiter: RateLimiter,
}

impl RateLimitLayer {
    /// Creates a layer around an existing limiter.
    pub fn new(limiter: RateLimiter) -> Self {
        Self { limiter }
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            limiter: self.limiter.clone(),
        }
    }
}

/// Tower `Service` that rejects over-budget requests with a 429 before
/// they reach the inner service.
#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    limiter: RateLimiter,
}

impl<S> Service<Request<Body>> for RateLimitService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let limiter = self.limiter.clone();

        Box::pin(async move {
            let key = client_ip(req.headers(), req.extensions())
                .unwrap_or_else(|| "unknown".to_string());

            if !limiter.check(&key) {
                warn!(client = %key, "Rate limit exceeded");
                return Ok(too_many_requests());
            }

            let resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {});
            Ok(resp.into_response())
        })
    }
}

fn too_many_requests() -> axum::response::Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({ "error": RATE_LIMIT_MESSAGE })),
    )
        .into_response()
}
