//! Frontdesk API server entry point.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use frontdesk_api::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,frontdesk=debug".into()),
        )
        .init();

    let config = Config::load();
    frontdesk_api::start_server(config).await
}
