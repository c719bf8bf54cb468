//! The user-facing command surface.
//!
//! Three commands make up the menu. Each has a stable name (used on the
//! command line and in trigger definitions) and the label shown in the
//! interactive menu. [`dispatch`] maps a command to its handler.

use crate::engine::{
    clear_persisted_state, confirm_then_delete_all, run_scan, DeletionSummary, ResetSummary,
    ScanSummary,
};
use crate::error::AppResult;
use crate::prompt::Prompter;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Rebuild the report from a full scan.
    StartListing,
    /// Clear persisted cursor and triggers, then scan.
    ResetAndStartOver,
    /// Confirm, then delete every listed group.
    DeleteFound,
}

/// Menu entries in display order.
pub const MENU: [Command; 3] = [
    Command::StartListing,
    Command::ResetAndStartOver,
    Command::DeleteFound,
];

impl Command {
    /// Stable command name.
    pub fn name(self) -> &'static str {
        match self {
            Self::StartListing => "scan",
            Self::ResetAndStartOver => "reset",
            Self::DeleteFound => "delete",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::StartListing => "Start Listing Empty Groups",
            Self::ResetAndStartOver => "Reset and Start Over",
            Self::DeleteFound => "Delete Found Empty Groups",
        }
    }

    /// Look a command up by its stable name.
    pub fn from_name(name: &str) -> Option<Self> {
        MENU.into_iter().find(|c| c.name() == name)
    }
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Scanned(ScanSummary),
    ResetAndScanned(ResetSummary, ScanSummary),
    Deleted(DeletionSummary),
    /// The user declined the deletion prompt.
    DeletionCancelled,
}

/// Run one command to completion.
pub async fn dispatch(
    command: Command,
    state: &AppState,
    prompter: &dyn Prompter,
) -> AppResult<Outcome> {
    tracing::debug!(command = command.name(), "Dispatching command");
    match command {
        Command::StartListing => run_scan(state).await.map(Outcome::Scanned),
        Command::ResetAndStartOver => {
            let reset = clear_persisted_state(state).await?;
            let scan = run_scan(state).await?;
            Ok(Outcome::ResetAndScanned(reset, scan))
        }
        Command::DeleteFound => Ok(match confirm_then_delete_all(state, prompter).await? {
            Some(summary) => Outcome::Deleted(summary),
            None => Outcome::DeletionCancelled,
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
