/// Errors from the directory service layer.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The directory returned a non-2xx status code.
    #[error("Directory API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The configured API base URL is unusable.
    #[error("Invalid Directory API URL: {0}")]
    InvalidUrl(String),
}

impl DirectoryError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) => None,
        }
    }
}
