use async_trait::async_trait;

use crate::error::SheetError;

/// Primitive operations on a single named tab.
///
/// Rows and columns are 1-based, as in spreadsheet A1 notation. A backend
/// is bound to one tab at construction time.
#[async_trait]
pub trait SheetBackend: Send + Sync {
    /// Name of the tab this backend writes to.
    fn sheet_name(&self) -> &str;

    /// Locate the tab, creating it if absent.
    async fn ensure_sheet(&self) -> Result<(), SheetError>;

    /// Remove every value from the tab.
    async fn clear(&self) -> Result<(), SheetError>;

    /// Overwrite `row` starting at column A.
    async fn write_row(&self, row: usize, cells: &[String]) -> Result<(), SheetError>;

    /// Write `cells` into the first empty row after the existing data.
    async fn append_row(&self, cells: &[String]) -> Result<(), SheetError>;

    /// Read rows from `first_row` to the end of the data, limited to the
    /// first `columns` columns. Trailing empty cells may be omitted.
    async fn read_rows(&self, first_row: usize, columns: usize)
        -> Result<Vec<Vec<String>>, SheetError>;

    /// Overwrite a single cell.
    async fn write_cell(&self, row: usize, column: usize, value: &str) -> Result<(), SheetError>;

    /// Render row 1 bold over `columns` columns and freeze it.
    async fn format_header(&self, columns: usize) -> Result<(), SheetError>;
}
