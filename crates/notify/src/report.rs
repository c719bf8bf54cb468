//! Fixed report template.

/// Subject line of every report email.
pub const REPORT_SUBJECT: &str = "Empty Google Workspace Groups Report";

/// Summary of one scan, rendered into the fixed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub count: usize,
    pub domain: String,
}

impl Report {
    pub fn new(count: usize, domain: impl Into<String>) -> Self {
        Self {
            count,
            domain: domain.into(),
        }
    }

    pub fn subject(&self) -> &'static str {
        REPORT_SUBJECT
    }

    pub fn body(&self) -> String {
        format!(
            "Found {} empty groups in the primary domain: {}.",
            self.count, self.domain
        )
    }
}
