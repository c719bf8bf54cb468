//! Shared domain types for the empty-group sweep.
//!
//! - [`types`]: directory entities ([`Group`], [`Member`]) and the
//!   qualifying predicate.
//! - [`report`]: the fixed report sheet layout and [`ReportRow`].
//! - [`time`]: timezone-aware date formatting for report cells.

pub mod error;
pub mod report;
pub mod time;
pub mod types;

pub use error::CoreError;
pub use report::{DeletionStatus, ReportRow};
pub use time::ReportTimezone;
pub use types::{is_qualifying, Group, Member};
