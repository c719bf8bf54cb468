use groupsweep_core::CoreError;
use groupsweep_directory::DirectoryError;
use groupsweep_notify::NotifyError;
use groupsweep_sheets::SheetError;
use groupsweep_state::StateError;

/// Application-level error type for commands.
///
/// Any of these aborts the running command. Per-group deletion failures
/// never reach this type; the deletion pass records them in the sheet.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Report sheet error: {0}")]
    Sheet(#[from] SheetError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("State store error: {0}")]
    State(#[from] StateError),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The interactive prompt could not be shown.
    #[error("Prompt error: {0}")]
    Prompt(String),
}

/// Convenience type alias for command results.
pub type AppResult<T> = Result<T, AppError>;
