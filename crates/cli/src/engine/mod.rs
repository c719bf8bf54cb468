//! The sweep's three operations: scan, delete and state reset.
//!
//! Each runs strictly sequentially: every remote call is awaited before the
//! next one is issued, so row order always equals discovery order.

pub mod deletion;
pub mod reset;
pub mod scan;

pub use deletion::{confirm_then_delete_all, delete_all, DeletionSummary, DELETE_CONFIRMATION};
pub use reset::{clear_persisted_state, ResetSummary};
pub use scan::{run_scan, ScanSummary, PAGE_TOKEN_KEY};
