//! The mail dispatcher: an owned SMTP client plus the two send
//! operations.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, warn};

use frontdesk_core::Enquiry;

use crate::error::{MailError, Result};
use crate::templates;

/// Settings for the SMTP transport and the rendered templates.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port (STARTTLS).
    pub port: u16,
    /// SMTP username, when the server requires authentication.
    pub username: Option<String>,
    /// SMTP password, paired with `username`.
    pub password: Option<String>,
    /// Sender mailbox for both emails.
    pub from: String,
    /// Recipient of admin notifications; `None` skips them.
    pub admin_email: Option<String>,
    /// Link target inside the admin notification.
    pub dashboard_url: String,
    /// Display name used in templates and the sender mailbox.
    pub site_name: String,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            username: None,
            password: None,
            from: "no-reply@localhost".to_string(),
            admin_email: None,
            dashboard_url: "http://localhost:3001/admin".to_string(),
            site_name: "Frontdesk".to_string(),
        }
    }
}

/// Sends the confirmation and admin-notification emails.
///
/// Owned by the request state and shared behind an `Arc`; there is no
/// process-wide transport. A dispatcher built with
/// [`disabled`](Self::disabled) accepts every send and does nothing,
/// which keeps unconfigured deployments and test harnesses on the same
/// code path as production.
pub struct MailDispatcher {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    config: MailerConfig,
}

impl MailDispatcher {
    /// Builds a dispatcher with a STARTTLS SMTP transport.
    pub fn new(config: MailerConfig) -> Result<Self> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);
        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }
        Ok(Self {
            transport: Some(builder.build()),
            config,
        })
    }

    /// Builds a dispatcher whose sends are logged no-ops.
    pub fn disabled() -> Self {
        Self {
            transport: None,
            config: MailerConfig::default(),
        }
    }

    /// Whether a transport is configured.
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Probes SMTP connectivity at process start.
    ///
    /// Diagnostic only: a failure logs a warning and the process keeps
    /// serving requests.
    pub async fn verify_connectivity(&self) {
        let Some(transport) = &self.transport else {
            info!("Mail dispatch disabled; skipping SMTP connectivity check");
            return;
        };
        match transport.test_connection().await {
            Ok(true) => info!(host = %self.config.host, "Mail server is ready to send messages"),
            Ok(false) => warn!(host = %self.config.host, "Mail server connection test failed"),
            Err(err) => warn!(host = %self.config.host, error = %err, "Mail configuration error"),
        }
    }

    /// Sends the receipt confirmation to the submitter.
    pub async fn send_confirmation(&self, enquiry: &Enquiry) -> Result<()> {
        let Some(transport) = &self.transport else {
            debug!(id = enquiry.id, "Mail disabled; skipping confirmation");
            return Ok(());
        };
        let message = Message::builder()
            .from(self.sender()?)
            .to(enquiry.email.parse()?)
            .subject(templates::confirmation_subject(&self.config.site_name))
            .header(ContentType::TEXT_HTML)
            .body(templates::confirmation_body(
                &self.config.site_name,
                &enquiry.name,
                &enquiry.subject,
            ))?;

        transport.send(message).await?;
        info!(id = enquiry.id, to = %enquiry.email, "Sent confirmation email");
        Ok(())
    }

    /// Sends the new-enquiry notification to the admin mailbox.
    pub async fn send_admin_notification(&self, enquiry: &Enquiry) -> Result<()> {
        let Some(transport) = &self.transport else {
            debug!(id = enquiry.id, "Mail disabled; skipping admin notification");
            return Ok(());
        };
        let Some(admin) = &self.config.admin_email else {
            debug!(id = enquiry.id, "No admin address configured; skipping notification");
            return Ok(());
        };
        let message = Message::builder()
            .from(self.sender()?)
            .to(admin.parse()?)
            .subject(templates::admin_subject(&enquiry.subject))
            .header(ContentType::TEXT_HTML)
            .body(templates::admin_body(enquiry, &self.config.dashboard_url))?;

        transport.send(message).await?;
        info!(id = enquiry.id, to = %admin, "Sent admin notification");
        Ok(())
    }

    fn sender(&self) -> Result<lettre::message::Mailbox> {
        format!("{} <{}>", self.config.site_name, self.config.from)
            .parse()
            .map_err(|_| MailError::InvalidAddress(self.config.from.clone()))
    }
}
