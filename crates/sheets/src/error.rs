use groupsweep_core::CoreError;

/// Errors from sheet backends and the report manager.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// A domain-level error (missing tab, malformed row).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The HTTP request itself failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Sheets API returned a non-2xx status code.
    #[error("Sheets API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// A row or column position outside the report layout.
    #[error("Invalid sheet position: {0}")]
    Layout(String),
}
