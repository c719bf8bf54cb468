//! Timezone-aware formatting for report cells.
//!
//! Dates written to the report are rendered in an explicitly configured
//! IANA timezone rather than the process-local one.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::CoreError;

/// `yyyy-MM-dd`, used for the Creation Date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `yyyy-MM-dd HH:mm:ss`, used for deletion status timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timezone used when rendering report dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTimezone(Tz);

impl ReportTimezone {
    /// Parse an IANA timezone identifier such as `Europe/Berlin` or `UTC`.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        Tz::from_str(name.trim())
            .map(Self)
            .map_err(|_| CoreError::Validation(format!("Unknown timezone '{name}'")))
    }

    /// IANA name of this timezone.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Render `at` as a calendar date in this timezone.
    pub fn format_date(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.0).format(DATE_FORMAT).to_string()
    }

    /// Render `at` as a date and wall-clock time in this timezone.
    pub fn format_timestamp(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.0).format(TIMESTAMP_FORMAT).to_string()
    }
}

impl Default for ReportTimezone {
    fn default() -> Self {
        Self(Tz::UTC)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
