//! Clearing of persisted state before a fresh scan.

use crate::engine::scan::PAGE_TOKEN_KEY;
use crate::error::AppResult;
use crate::state::AppState;

/// What [`clear_persisted_state`] removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetSummary {
    /// Cursor left behind by an unfinished scan, if there was one.
    pub cleared_cursor: Option<String>,
    /// Ids of the cancelled triggers.
    pub cancelled_triggers: Vec<String>,
}

/// Delete the persisted page cursor and cancel every registered trigger.
pub async fn clear_persisted_state(state: &AppState) -> AppResult<ResetSummary> {
    let cleared_cursor = state.properties.get(PAGE_TOKEN_KEY)?;
    state.properties.delete(PAGE_TOKEN_KEY)?;

    let mut cancelled_triggers = Vec::new();
    for trigger in state.triggers.list_triggers()? {
        state.triggers.delete_trigger(&trigger.id)?;
        tracing::info!(trigger = %trigger.id, handler = %trigger.handler, "Trigger cancelled");
        cancelled_triggers.push(trigger.id);
    }

    tracing::info!(
        had_cursor = cleared_cursor.is_some(),
        triggers = cancelled_triggers.len(),
        "Persisted state cleared"
    );
    Ok(ResetSummary {
        cleared_cursor,
        cancelled_triggers,
    })
}
