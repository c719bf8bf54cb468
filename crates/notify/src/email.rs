//! Report delivery via SMTP.
//!
//! [`EmailNotifier`] sends the plain-text scan report through the `lettre`
//! async SMTP transport (STARTTLS relay). SMTP settings are optional: when
//! `SMTP_HOST` is unset [`EmailConfig::from_lookup`] yields `None` and the
//! report is only logged by [`LogNotifier`](crate::LogNotifier).

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::report::Report;
use crate::Notifier;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Connecting, authenticating or handing the report to the relay failed.
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// `SMTP_FROM` or the report recipient is not a valid mailbox.
    #[error("Invalid report address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not build report email: {0}")]
    Build(String),

    /// SMTP settings present but unusable.
    #[error("Invalid SMTP settings: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "groupsweep@localhost";

/// Relay settings for the report email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Sender mailbox of the report.
    pub from_address: String,
    /// Login for relays that require authentication.
    pub credentials: Option<(String, String)>,
}

impl EmailConfig {
    /// Read SMTP settings from a variable source; blank values count as
    /// unset.
    ///
    /// | Variable                      | Default                         |
    /// |-------------------------------|---------------------------------|
    /// | `SMTP_HOST`                   | unset: reports are only logged  |
    /// | `SMTP_PORT`                   | `587`                           |
    /// | `SMTP_FROM`                   | `groupsweep@localhost`          |
    /// | `SMTP_USER` + `SMTP_PASSWORD` | no authentication               |
    ///
    /// A malformed port, or a user without a password (or the reverse), is
    /// an error rather than a silent fallback.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, NotifyError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let Some(smtp_host) = var("SMTP_HOST") else {
            return Ok(None);
        };

        let smtp_port = match var("SMTP_PORT") {
            Some(raw) => raw.parse().map_err(|_| {
                NotifyError::Config(format!("SMTP_PORT must be a port number, got '{raw}'"))
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        let credentials = match (var("SMTP_USER"), var("SMTP_PASSWORD")) {
            (Some(user), Some(password)) => Some((user, password)),
            (None, None) => None,
            _ => {
                return Err(NotifyError::Config(
                    "SMTP_USER and SMTP_PASSWORD must be set together".into(),
                ))
            }
        };

        Ok(Some(Self {
            smtp_host,
            smtp_port,
            from_address: var("SMTP_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.into()),
            credentials,
        }))
    }
}

// ---------------------------------------------------------------------------
// EmailNotifier
// ---------------------------------------------------------------------------

/// Emails the scan report to one fixed recipient.
pub struct EmailNotifier {
    config: EmailConfig,
    recipient: String,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig, recipient: impl Into<String>) -> Self {
        Self {
            config,
            recipient: recipient.into(),
        }
    }

    /// Assemble the report message without sending it.
    pub fn build_message(&self, report: &Report) -> Result<Message, NotifyError> {
        Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.recipient.parse()?)
            .subject(report.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(report.body())
            .map_err(|e| NotifyError::Build(e.to_string()))
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send_report(&self, count: usize, domain: &str) -> Result<(), NotifyError> {
        let report = Report::new(count, domain);
        let email = self.build_message(&report)?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let Some((user, password)) = &self.config.credentials {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = %self.recipient, count, domain, "Report email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
