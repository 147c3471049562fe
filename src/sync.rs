//! Project board synchronizer.
//!
//! One run, executed start to finish with no resumption: resolve the board,
//! clear it, then walk the task catalog creating epic and subtask issues,
//! adding each to the board, and linking subtasks under their epic. The
//! first error aborts the run and leaves the remote state wherever it got.

use tracing::{debug, info};

use crate::catalog::Epic;
use crate::error::TrackerResult;
use crate::github::IssueTracker;
use crate::pacing::Pacer;

/// Counts of the work performed by a synchronizer run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Board items deleted while clearing
    pub items_cleared: usize,
    /// Epic issues created
    pub epics_created: usize,
    /// Subtask issues created
    pub subtasks_created: usize,
    /// Issues added to the project board
    pub items_added: usize,
    /// Sub-issue links recorded
    pub links_created: usize,
}

/// Drives one synchronization run against an [`IssueTracker`].
pub struct Synchronizer<'a, T: IssueTracker> {
    tracker: &'a T,
    pacer: Pacer,
}

impl<'a, T: IssueTracker> Synchronizer<'a, T> {
    /// Create a synchronizer with the default one-second pacing.
    pub fn new(tracker: &'a T) -> Self {
        Self {
            tracker,
            pacer: Pacer::default(),
        }
    }

    /// Replace the pacing policy.
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Run the full synchronization over `catalog`.
    pub async fn run(&self, catalog: &[Epic]) -> TrackerResult<SyncReport> {
        let mut report = SyncReport::default();

        let project_id = self.tracker.project_id().await?;
        let repository_id = self.tracker.repository_id().await?;
        debug!(%project_id, %repository_id, "resolved identifiers");

        report.items_cleared = self.clear_board(&project_id).await?;
        info!(cleared = report.items_cleared, "cleared project board");

        for epic in catalog {
            let issue = self
                .tracker
                .create_issue(
                    &format!("Epic: {}", epic.name),
                    &format!("Tracking work for **{}**.", epic.name),
                    &[],
                )
                .await?;
            self.tracker
                .add_issue_to_project(&project_id, issue.number)
                .await?;
            report.epics_created += 1;
            report.items_added += 1;
            info!(url = %issue.url, "created epic");
            self.pacer.pause().await;

            for task in epic.subtasks {
                let body = format!("Subtask of #{}\n\n## Task\n{}\n", issue.number, task);
                let sub = self.tracker.create_issue(task, &body, &[]).await?;
                self.tracker
                    .add_issue_to_project(&project_id, sub.number)
                    .await?;
                self.tracker
                    .link_sub_issue(issue.number, sub.number)
                    .await?;
                report.subtasks_created += 1;
                report.items_added += 1;
                report.links_created += 1;
                info!(url = %sub.url, "created and linked sub-issue");
                self.pacer.pause().await;
            }
        }

        Ok(report)
    }

    /// Delete every item on the first page of the board.
    async fn clear_board(&self, project_id: &str) -> TrackerResult<usize> {
        let items = self.tracker.list_project_items(project_id).await?;
        let mut cleared = 0;
        for item in items {
            debug!(item_id = %item.id, title = ?item.title, "deleting project item");
            self.tracker.delete_project_item(&item.id).await?;
            cleared += 1;
        }
        Ok(cleared)
    }
}
