//! Environment-provided server configuration.
//!
//! All settings come from environment variables; there is no CLI
//! surface. Optional values fall back to defaults with a logged note.
//! SMTP settings are optional as a group: when `SMTP_HOST` is unset the
//! mail dispatcher runs disabled and submissions still succeed.

use std::{env, fmt::Display, str::FromStr};

use tracing::info;

use frontdesk_mail::MailerConfig;

/// Origins admitted by default when `CORS_ORIGINS` is unset: the local
/// static-site dev servers.
const DEFAULT_ORIGINS: &str = "http://localhost:5500,http://127.0.0.1:5500";

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port.
    pub port: u16,
    /// Environment mode flag (`development` enables error detail in
    /// 500 responses).
    pub env: String,
    /// sqlx connection string.
    pub database_url: String,
    /// CORS origin allow-list.
    pub cors_origins: Vec<String>,
    /// Requests allowed per client IP per 15-minute window.
    pub rate_limit_max: u32,
    /// SMTP settings; `None` disables mail dispatch.
    pub mail: Option<MailerConfig>,
}

impl Config {
    /// Reads the full configuration from the environment.
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "3001"),
            env: try_load("APP_ENV", "production"),
            database_url: try_load("DATABASE_URL", "sqlite::memory:"),
            cors_origins: try_load::<String>("CORS_ORIGINS", DEFAULT_ORIGINS)
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            rate_limit_max: try_load("RATE_LIMIT_MAX", "100"),
            mail: load_mail_config(),
        }
    }

    /// Whether the server runs in development mode.
    pub fn is_development(&self) -> bool {
        self.env == "development"
    }
}

fn load_mail_config() -> Option<MailerConfig> {
    let Ok(host) = env::var("SMTP_HOST") else {
        info!("SMTP_HOST not set; mail dispatch disabled");
        return None;
    };
    let username = env::var("SMTP_USER").ok();
    let from = env::var("MAIL_FROM")
        .ok()
        .or_else(|| username.clone())
        .unwrap_or_else(|| "no-reply@localhost".to_string());
    Some(MailerConfig {
        host,
        port: try_load("SMTP_PORT", "587"),
        username,
        password: env::var("SMTP_PASSWORD").ok(),
        from,
        admin_email: env::var("ADMIN_EMAIL").ok(),
        dashboard_url: try_load("ADMIN_DASHBOARD_URL", "http://localhost:3001/admin"),
        site_name: try_load("SITE_NAME", "Frontdesk"),
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().unwrap_or_else(|e| {
        info!("Invalid {key} value ({e}), using default: {default}");
        default
            .parse()
            .unwrap_or_else(|e| panic!("Default for {key} must parse: {e}"))
    })
}
