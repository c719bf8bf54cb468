//! Report lifecycle on top of a [`SheetBackend`].
//!
//! Row 1 always holds the header; data rows are contiguous from row 2 and
//! are only ever removed all at once by [`ReportSheet::reset`].

use std::sync::Arc;

use groupsweep_core::report::{sheet_row, DATA_COLUMNS, HEADER, HEADER_ROW, STATUS_COLUMN};
use groupsweep_core::ReportRow;

use crate::backend::SheetBackend;
use crate::error::SheetError;

/// A report row as read back from the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedRow {
    /// 1-based data row index (sheet row minus the header).
    pub index: usize,
    pub row: ReportRow,
}

/// The empty-group report stored in one sheet tab.
#[derive(Clone)]
pub struct ReportSheet {
    backend: Arc<dyn SheetBackend>,
}

impl ReportSheet {
    pub fn new(backend: Arc<dyn SheetBackend>) -> Self {
        Self { backend }
    }

    /// Name of the tab backing the report.
    pub fn sheet_name(&self) -> &str {
        self.backend.sheet_name()
    }

    /// Locate or create the tab, clear it, write the header row and freeze
    /// it. Calling this twice leaves just the header.
    pub async fn reset(&self) -> Result<(), SheetError> {
        self.backend.ensure_sheet().await?;
        self.backend.clear().await?;

        let header: Vec<String> = HEADER.iter().map(|h| h.to_string()).collect();
        self.backend.write_row(HEADER_ROW, &header).await?;
        self.backend.format_header(DATA_COLUMNS).await?;

        tracing::debug!(sheet = %self.sheet_name(), "Report sheet reset");
        Ok(())
    }

    /// Append one data row after the existing ones.
    pub async fn append_row(&self, row: &ReportRow) -> Result<(), SheetError> {
        self.backend.append_row(&row.to_cells()).await
    }

    /// Every data row in stored order, header excluded, each paired with
    /// its data row index.
    ///
    /// Entirely blank rows are skipped but still count towards the index of
    /// the rows after them, so [`ListedRow::index`] can always be passed to
    /// [`ReportSheet::annotate`]. A row with content but no email address is
    /// an error.
    pub async fn read_all_rows(&self) -> Result<Vec<ListedRow>, SheetError> {
        let raw = self
            .backend
            .read_rows(sheet_row(1), STATUS_COLUMN)
            .await?;

        raw.iter()
            .enumerate()
            .filter(|(_, cells)| cells.iter().any(|c| !c.trim().is_empty()))
            .map(|(i, cells)| -> Result<ListedRow, SheetError> {
                Ok(ListedRow {
                    index: i + 1,
                    row: ReportRow::from_cells(cells)?,
                })
            })
            .collect()
    }

    /// Write `status` into the status column of data row `index`
    /// (1-based, counting from the first row after the header).
    pub async fn annotate(&self, index: usize, status: &str) -> Result<(), SheetError> {
        if index == 0 {
            return Err(SheetError::Layout(
                "data row index 0 (data rows are 1-based)".into(),
            ));
        }
        self.backend
            .write_cell(sheet_row(index), STATUS_COLUMN, status)
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
