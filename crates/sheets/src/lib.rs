//! Report sheet storage.
//!
//! - [`SheetBackend`]: primitive operations on one named tab of a
//!   spreadsheet.
//! - [`GoogleSheetsBackend`]: backend over the Sheets v4 REST API.
//! - [`MemorySheetBackend`]: in-process grid, used by tests and dry runs.
//! - [`ReportSheet`]: the report lifecycle (reset, append, read back,
//!   annotate) on top of any backend.

pub mod backend;
pub mod error;
pub mod google;
pub mod memory;
pub mod report;

pub use backend::SheetBackend;
pub use error::SheetError;
pub use google::GoogleSheetsBackend;
pub use memory::MemorySheetBackend;
pub use report::{ListedRow, ReportSheet};
