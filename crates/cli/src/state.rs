use std::sync::Arc;
use std::time::Duration;

use groupsweep_core::ReportTimezone;
use groupsweep_directory::{AdminDirectoryApi, DirectoryClient};
use groupsweep_notify::{EmailNotifier, LogNotifier, Notifier};
use groupsweep_sheets::{GoogleSheetsBackend, MemorySheetBackend, ReportSheet};
use groupsweep_state::{FileStateStore, KeyValueStore, MemoryStateStore, TriggerRegistry};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Services shared by every command handler.
///
/// Cheaply cloneable; every service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn DirectoryClient>,
    pub sheet: ReportSheet,
    pub notifier: Arc<dyn Notifier>,
    /// Persisted properties (scan progress cursor).
    pub properties: Arc<dyn KeyValueStore>,
    /// Scheduled triggers cancelled on reset.
    pub triggers: Arc<dyn TriggerRegistry>,
    /// Customer whose primary domain goes into the report.
    pub customer_id: String,
    pub timezone: ReportTimezone,
}

impl AppState {
    /// Wire the production services described by `config`.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let token = config.access_token()?;

        let directory = AdminDirectoryApi::new(
            config.directory_api_url.as_str(),
            token,
            config.customer_id.as_str(),
            timeout,
        )?;

        let backend = GoogleSheetsBackend::new(
            config.sheets_api_url.as_str(),
            token,
            config.spreadsheet_id()?,
            config.sheet_name.as_str(),
            timeout,
        )?;

        let recipient = config.recipient()?;
        let notifier: Arc<dyn Notifier> = match &config.email {
            Some(email) => Arc::new(EmailNotifier::new(email.clone(), recipient)),
            None => {
                tracing::warn!("SMTP_HOST not set, reports will be logged instead of emailed");
                Arc::new(LogNotifier::new(recipient))
            }
        };

        let store = Arc::new(FileStateStore::new(config.state_file.clone()));

        Ok(Self {
            directory: Arc::new(directory),
            sheet: ReportSheet::new(Arc::new(backend)),
            notifier,
            properties: store.clone(),
            triggers: store,
            customer_id: config.customer_id.clone(),
            timezone: config.timezone,
        })
    }

    /// Wire a scan that reads the real directory but keeps the report in
    /// memory, logs instead of emailing and leaves persisted state alone.
    ///
    /// Returns the in-memory backend so the caller can print the report.
    pub fn dry_run(config: &AppConfig) -> AppResult<(Self, Arc<MemorySheetBackend>)> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let directory = AdminDirectoryApi::new(
            config.directory_api_url.as_str(),
            config.access_token()?,
            config.customer_id.as_str(),
            timeout,
        )?;

        let backend = Arc::new(MemorySheetBackend::new(config.sheet_name.as_str()));
        let store = Arc::new(MemoryStateStore::new());
        let recipient = config.recipient.clone().unwrap_or_else(|| "(dry run)".into());

        let state = Self {
            directory: Arc::new(directory),
            sheet: ReportSheet::new(backend.clone()),
            notifier: Arc::new(LogNotifier::new(recipient)),
            properties: store.clone(),
            triggers: store,
            customer_id: config.customer_id.clone(),
            timezone: config.timezone,
        };
        Ok((state, backend))
    }
}
