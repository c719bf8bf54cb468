//! Report notification for the empty-group sweep.
//!
//! - [`Notifier`]: sends the one-off summary after a scan.
//! - [`EmailNotifier`]: SMTP delivery via `lettre`.
//! - [`LogNotifier`]: logs the rendered report; used when SMTP is not
//!   configured.

pub mod email;
pub mod report;

use async_trait::async_trait;

pub use email::{EmailConfig, EmailNotifier, NotifyError};
pub use report::{Report, REPORT_SUBJECT};

/// Sends the scan summary to the configured recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send exactly one report for `count` empty groups in `domain`.
    async fn send_report(&self, count: usize, domain: &str) -> Result<(), NotifyError>;
}

/// Notifier that only logs what it would have sent.
pub struct LogNotifier {
    recipient: String,
}

impl LogNotifier {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_report(&self, count: usize, domain: &str) -> Result<(), NotifyError> {
        let report = Report::new(count, domain);
        tracing::warn!(
            to = %self.recipient,
            subject = report.subject(),
            body = %report.body(),
            "SMTP not configured, report logged instead of emailed"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
