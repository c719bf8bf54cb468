use std::path::PathBuf;

use groupsweep_core::ReportTimezone;
use groupsweep_notify::EmailConfig;

use crate::error::{AppError, AppResult};

/// Configuration loaded from environment variables.
///
/// Only the settings a command actually uses are required; the accessors
/// for required values return [`AppError::Config`] when they are missing.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OAuth bearer token supplied by the host environment.
    pub access_token: Option<String>,
    /// Customer whose groups are scanned.
    pub customer_id: String,
    pub directory_api_url: String,
    pub sheets_api_url: String,
    /// Spreadsheet holding the report tab.
    pub spreadsheet_id: Option<String>,
    /// Name of the report tab.
    pub sheet_name: String,
    /// Fixed recipient of the report email.
    pub recipient: Option<String>,
    /// Timezone for creation dates and deletion timestamps.
    pub timezone: ReportTimezone,
    /// JSON file holding persisted properties and triggers.
    pub state_file: PathBuf,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// SMTP settings; `None` means reports are logged, not emailed.
    pub email: Option<EmailConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                         |
    /// |-------------------------|---------------------------------|
    /// | `GOOGLE_ACCESS_TOKEN`   | — (required for remote calls)   |
    /// | `DIRECTORY_CUSTOMER_ID` | `my_customer`                   |
    /// | `DIRECTORY_API_URL`     | `https://admin.googleapis.com`  |
    /// | `SHEETS_API_URL`        | `https://sheets.googleapis.com` |
    /// | `REPORT_SPREADSHEET_ID` | — (required for the report)     |
    /// | `REPORT_SHEET_NAME`     | `Empty Groups`                  |
    /// | `REPORT_RECIPIENT`      | — (required to send the report) |
    /// | `REPORT_TIMEZONE`       | `UTC`                           |
    /// | `STATE_FILE`            | `.groupsweep/state.json`        |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                            |
    ///
    /// SMTP settings are documented on [`EmailConfig::from_lookup`].
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timezone = match var("REPORT_TIMEZONE") {
            Some(name) => ReportTimezone::parse(&name)?,
            None => ReportTimezone::default(),
        };

        let request_timeout_secs = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                AppError::Config(format!("REQUEST_TIMEOUT_SECS must be a valid u64, got '{raw}'"))
            })?,
            None => 30,
        };

        let email = EmailConfig::from_lookup(&lookup)?;

        Ok(Self {
            access_token: var("GOOGLE_ACCESS_TOKEN"),
            customer_id: var("DIRECTORY_CUSTOMER_ID")
                .unwrap_or_else(|| groupsweep_directory::api::MY_CUSTOMER.into()),
            directory_api_url: var("DIRECTORY_API_URL")
                .unwrap_or_else(|| groupsweep_directory::api::DEFAULT_API_URL.into()),
            sheets_api_url: var("SHEETS_API_URL")
                .unwrap_or_else(|| groupsweep_sheets::google::DEFAULT_API_URL.into()),
            spreadsheet_id: var("REPORT_SPREADSHEET_ID"),
            sheet_name: var("REPORT_SHEET_NAME").unwrap_or_else(|| "Empty Groups".into()),
            recipient: var("REPORT_RECIPIENT"),
            timezone,
            state_file: var("STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".groupsweep/state.json")),
            request_timeout_secs,
            email,
        })
    }

    pub fn access_token(&self) -> AppResult<&str> {
        require(&self.access_token, "GOOGLE_ACCESS_TOKEN")
    }

    pub fn spreadsheet_id(&self) -> AppResult<&str> {
        require(&self.spreadsheet_id, "REPORT_SPREADSHEET_ID")
    }

    pub fn recipient(&self) -> AppResult<&str> {
        require(&self.recipient, "REPORT_RECIPIENT")
    }
}

fn require<'a>(value: &'a Option<String>, name: &str) -> AppResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| AppError::Config(format!("{name} must be set")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
