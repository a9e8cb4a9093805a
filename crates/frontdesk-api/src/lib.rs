//! # frontdesk-api
//!
//! HTTP API server for the Frontdesk enquiry service.
//!
//! Five REST endpoints over the `enquiries` table plus a liveness
//! probe, all JSON under the `/api` prefix:
//!
//! | Method & path | Purpose |
//! |---|---|
//! | POST `/api/enquiries/submit` | create enquiry |
//! | GET `/api/enquiries` | list (status filter + paging) |
//! | GET `/api/enquiries/stats` | trailing-30-day aggregates |
//! | GET `/api/enquiries/{id}` | fetch one |
//! | PATCH `/api/enquiries/{id}/status` | update status |
//! | GET `/api/health` | liveness |
//!
//! Cross-cutting layers: IP rate limiting over `/api`, CORS restricted
//! to the configured origin allow-list, security headers on every
//! response, JSON 404 fallback.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, patch, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod rate_limit;
pub mod state;

pub use config::Config;
pub use error::ApiError;
pub use rate_limit::{RateLimitLayer, RateLimiter, RATE_LIMIT_WINDOW};
pub use state::AppState;

use frontdesk_mail::MailDispatcher;
use frontdesk_storage::EnquiryStore;

/// Builds the full router from injected components.
///
/// The rate limiter covers everything under `/api`; the admin-facing
/// routes (listing, stats, status update) are where an authentication
/// layer would mount if one is added.
pub fn app(state: AppState, limiter: RateLimiter, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/enquiries/submit", post(handlers::submit_enquiry))
        .route("/enquiries", get(handlers::list_enquiries))
        .route("/enquiries/stats", get(handlers::enquiry_stats))
        .route("/enquiries/{id}", get(handlers::get_enquiry))
        .route("/enquiries/{id}/status", patch(handlers::update_enquiry_status))
        .route("/health", get(handlers::health))
        .layer(RateLimitLayer::new(limiter));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(cors_layer(cors_origins))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Initializes the injected components from configuration and serves
/// until a shutdown signal arrives.
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let store = EnquiryStore::connect(&config.database_url).await?;
    store.migrate().await?;

    let mailer = Arc::new(match &config.mail {
        Some(mail) => MailDispatcher::new(mail.clone())?,
        None => MailDispatcher::disabled(),
    });
    // Diagnostic only; serving starts regardless of the outcome.
    let probe = mailer.clone();
    tokio::spawn(async move { probe.verify_connectivity().await });

    let limiter = RateLimiter::new(config.rate_limit_max as usize, RATE_LIMIT_WINDOW);
    let state = AppState::new(store, mailer, config.is_development());
    let router = app(state, limiter, &config.cors_origins);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");
    info!("Contact form endpoint: http://localhost:{}/api/enquiries/submit", config.port);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
