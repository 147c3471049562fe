//! Bulk deletion of closed issues.
//!
//! Lists closed issues page by page until an empty page comes back,
//! accumulating them in memory, then deletes each by its global identifier.
//! Issues that change state between pages are an accepted race; the run
//! simply acts on the snapshot it listed. No pacing delay between deletions.

use tracing::info;

use crate::error::TrackerResult;
use crate::github::{ClosedIssue, IssueTracker};

/// Collect every closed issue the tracker reports.
pub async fn collect_closed_issues<T: IssueTracker>(
    tracker: &T,
) -> TrackerResult<Vec<ClosedIssue>> {
    let mut issues = Vec::new();
    let mut page = 1;
    loop {
        let batch = tracker.closed_issues_page(page).await?;
        if batch.is_empty() {
            break;
        }
        issues.extend(batch);
        page += 1;
    }
    Ok(issues)
}

/// Delete every closed issue in the repository. Returns the number deleted.
pub async fn run_cleanup<T: IssueTracker>(tracker: &T) -> TrackerResult<usize> {
    let closed = collect_closed_issues(tracker).await?;
    info!(count = closed.len(), "found closed issues");

    for issue in &closed {
        tracker.delete_issue(&issue.node_id).await?;
        info!(number = issue.number, title = %issue.title, "deleted issue");
    }

    Ok(closed.len())
}

/// Close an issue by number, then delete it.
pub async fn close_and_delete<T: IssueTracker>(tracker: &T, number: u64) -> TrackerResult<()> {
    let node_id = tracker.issue_node_id(number).await?;

    tracker.close_issue(&node_id).await?;
    info!(number, "closed issue");

    tracker.delete_issue(&node_id).await?;
    info!(number, "deleted issue");

    Ok(())
}
