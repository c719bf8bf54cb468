//! Scan for groups with no members and no owners.

use groupsweep_core::{is_qualifying, ReportRow};
use groupsweep_directory::GroupPages;

use crate::error::AppResult;
use crate::state::AppState;

/// Property key under which the scan records the cursor of the page it is
/// fetching. A leftover value means the last scan did not finish.
pub const PAGE_TOKEN_KEY: &str = "pageToken";

/// Result of one completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub pages: usize,
    pub groups_scanned: usize,
    /// Rows written to the report; equals the number of qualifying groups.
    pub empty_groups: usize,
    /// Primary domain named in the report email, if one was sent.
    pub notified_domain: Option<String>,
}

/// Rebuild the report from scratch and email a summary if anything was
/// found.
///
/// The sheet is reset first, then every group of the customer is checked
/// page by page. Any directory, sheet or state failure aborts the scan; it
/// is never resumed and must be started again from the beginning.
pub async fn run_scan(state: &AppState) -> AppResult<ScanSummary> {
    tracing::info!(sheet = %state.sheet.sheet_name(), "Starting empty group scan");
    state.sheet.reset().await?;

    let mut summary = ScanSummary::default();
    let mut pages = GroupPages::new(state.directory.as_ref());

    loop {
        if let Some(cursor) = pages.cursor() {
            state.properties.set(PAGE_TOKEN_KEY, cursor)?;
        }

        let Some(page) = pages.next_page().await? else {
            break;
        };
        summary.pages = pages.pages_fetched();

        for group in &page.groups {
            summary.groups_scanned += 1;

            let members = state.directory.list_members(&group.id).await?;
            let owners = state.directory.list_owners(&group.id).await?;
            if !is_qualifying(&members, &owners) {
                continue;
            }

            let row = ReportRow::for_group(group, members.len(), owners.len(), &state.timezone);
            state.sheet.append_row(&row).await?;
            summary.empty_groups += 1;
            tracing::info!(group = %group.email, name = %group.name, "Empty group found");
        }

        tracing::info!(
            page = summary.pages,
            groups = page.groups.len(),
            empty_so_far = summary.empty_groups,
            "Processed group page"
        );
    }

    state.properties.delete(PAGE_TOKEN_KEY)?;

    if summary.empty_groups > 0 {
        let domain = state
            .directory
            .customer_primary_domain(&state.customer_id)
            .await?;
        state
            .notifier
            .send_report(summary.empty_groups, &domain)
            .await?;
        summary.notified_domain = Some(domain);
    } else {
        tracing::info!("No empty groups found, no report sent");
    }

    tracing::info!(
        pages = summary.pages,
        groups_scanned = summary.groups_scanned,
        empty_groups = summary.empty_groups,
        "Scan complete"
    );
    Ok(summary)
}
