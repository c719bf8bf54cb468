//! Deletion of the groups listed in the report.

use chrono::Utc;
use groupsweep_core::DeletionStatus;

use crate::error::AppResult;
use crate::prompt::Prompter;
use crate::state::AppState;

/// Question asked before anything is deleted.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete all listed empty groups?";

/// Result of one deletion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionSummary {
    pub attempted: usize,
    pub deleted: usize,
    pub failed: usize,
}

/// Delete the group behind every report row, in stored order, and record
/// the outcome in the row's status cell.
///
/// A failed deletion is logged and marked `Failed to delete`; the pass
/// carries on with the next row and never retries. Failures reading or
/// writing the sheet itself abort the pass.
pub async fn delete_all(state: &AppState) -> AppResult<DeletionSummary> {
    let rows = state.sheet.read_all_rows().await?;
    tracing::info!(rows = rows.len(), "Deleting listed groups");

    let mut summary = DeletionSummary::default();
    for listed in &rows {
        let row = &listed.row;
        summary.attempted += 1;

        let status = match state.directory.delete_group(&row.email).await {
            Ok(()) => {
                summary.deleted += 1;
                tracing::info!(group = %row.email, "Group deleted");
                DeletionStatus::Deleted(Utc::now())
            }
            Err(e) => {
                summary.failed += 1;
                tracing::error!(group = %row.email, error = %e, "Failed to delete group");
                DeletionStatus::Failed
            }
        };

        state
            .sheet
            .annotate(listed.index, &status.render(&state.timezone))
            .await?;
    }

    tracing::info!(
        attempted = summary.attempted,
        deleted = summary.deleted,
        failed = summary.failed,
        "Deletion pass complete"
    );
    Ok(summary)
}

/// Ask for confirmation, then run [`delete_all`].
///
/// Returns `None` when the user declines; that is not an error and nothing
/// is changed.
pub async fn confirm_then_delete_all(
    state: &AppState,
    prompter: &dyn Prompter,
) -> AppResult<Option<DeletionSummary>> {
    if !prompter.confirm(DELETE_CONFIRMATION)? {
        tracing::info!("Deletion cancelled by user");
        return Ok(None);
    }
    delete_all(state).await.map(Some)
}
