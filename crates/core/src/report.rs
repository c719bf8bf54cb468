//! Report sheet layout and rows.
//!
//! The sheet has a fixed column order:
//!
//! | Col | Header          | Content                                       |
//! |-----|-----------------|-----------------------------------------------|
//! | A   | Group Name      | display name                                  |
//! | B   | Members         | always `0` at write time                      |
//! | C   | Owners          | always `0` at write time                      |
//! | D   | Creation Date   | `yyyy-MM-dd`                                  |
//! | E   | Email Address   | group email, the deletion key                 |
//! | F   | Status          | written by the deletion pass only             |
//!
//! Row 1 is the header; data rows start at row 2.

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::time::ReportTimezone;
use crate::types::Group;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Header cells written by a scan (columns A..E).
pub const HEADER: [&str; 5] = [
    "Group Name",
    "Members",
    "Owners",
    "Creation Date",
    "Email Address",
];

/// Number of columns written by a scan.
pub const DATA_COLUMNS: usize = HEADER.len();

/// 1-based column index of the deletion status cell (column F).
pub const STATUS_COLUMN: usize = DATA_COLUMNS + 1;

/// 1-based sheet row holding the header.
pub const HEADER_ROW: usize = 1;

/// Literal status written when a deletion fails.
pub const FAILED_STATUS: &str = "Failed to delete";

/// Prefix of the status written after a successful deletion.
pub const DELETED_PREFIX: &str = "Deleted at ";

/// Convert a 1-based data row index (first row after the header is 1) to its
/// 1-based sheet row.
pub fn sheet_row(data_index: usize) -> usize {
    HEADER_ROW + data_index
}

/// Spreadsheet column letter for a 1-based column index (1 → `A`).
pub fn column_letter(column: usize) -> String {
    let mut n = column;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

// ---------------------------------------------------------------------------
// DeletionStatus
// ---------------------------------------------------------------------------

/// Outcome of deleting the group behind one report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionStatus {
    Deleted(DateTime<Utc>),
    Failed,
}

impl DeletionStatus {
    /// Text written into the status column.
    pub fn render(&self, tz: &ReportTimezone) -> String {
        match self {
            Self::Deleted(at) => format!("{DELETED_PREFIX}{}", tz.format_timestamp(*at)),
            Self::Failed => FAILED_STATUS.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// ReportRow
// ---------------------------------------------------------------------------

/// One data row of the report sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub name: String,
    pub members: String,
    pub owners: String,
    pub creation_date: String,
    pub email: String,
    /// Deletion status, present only after a deletion pass touched the row.
    pub status: Option<String>,
}

impl ReportRow {
    /// Build the row for a qualifying group.
    ///
    /// `members` and `owners` are the listing sizes, which are zero for any
    /// group that reaches the report.
    pub fn for_group(group: &Group, members: usize, owners: usize, tz: &ReportTimezone) -> Self {
        Self {
            name: group.name.clone(),
            members: members.to_string(),
            owners: owners.to_string(),
            creation_date: group
                .creation_time
                .map(|at| tz.format_date(at))
                .unwrap_or_default(),
            email: group.email.clone(),
            status: None,
        }
    }

    /// Cell values for columns A..E.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.members.clone(),
            self.owners.clone(),
            self.creation_date.clone(),
            self.email.clone(),
        ]
    }

    /// Parse a row read back from the sheet.
    ///
    /// Trailing empty cells are commonly omitted by sheet backends, so short
    /// rows are padded. The email column is mandatory.
    pub fn from_cells(cells: &[String]) -> Result<Self, CoreError> {
        let cell = |i: usize| cells.get(i).map(|s| s.trim().to_string()).unwrap_or_default();

        let email = cell(4);
        if email.is_empty() {
            return Err(CoreError::Validation(format!(
                "Report row has no email address: {cells:?}"
            )));
        }

        let status = cell(5);
        Ok(Self {
            name: cell(0),
            members: cell(1),
            owners: cell(2),
            creation_date: cell(3),
            email,
            status: (!status.is_empty()).then_some(status),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
