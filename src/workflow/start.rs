//! Starting work on an issue
//!
//! Moving an issue to "in progress" makes a Gitee webhook create a branch
//! named after the issue. The branch shows up asynchronously, so it is
//! polled for a bounded number of times before being checked out.

use crate::config::WorkflowConfig;
use crate::error::{Error, Result};
use crate::merge::ProgressCallback;
use crate::platform::HostingService;
use crate::release::Ineligibility;
use crate::repo::VersionControl;
use crate::tracker::IssueTracker;
use crate::types::{Branch, IssueStatus};
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of `start_issue`
#[derive(Debug, Clone)]
pub enum StartOutcome {
    /// Issue is resolved or closed; nothing was changed
    Rejected(Ineligibility),
    /// Branch exists and is checked out
    Started {
        /// Branch checked out
        branch: Branch,
        /// Whether the issue was transitioned by this run
        transitioned: bool,
    },
}

/// Poll for a branch until it exists
///
/// Probes up to `attempts` times, sleeping `interval` between probes.
pub async fn wait_for_branch(
    hosting: &dyn HostingService,
    name: &str,
    interval: Duration,
    attempts: u32,
) -> Result<Branch> {
    for attempt in 1..=attempts {
        if let Some(branch) = hosting.fetch_branch(name).await? {
            debug!(branch = name, attempt, "branch found");
            return Ok(branch);
        }
        debug!(branch = name, attempt, attempts, "branch not there yet");
        if attempt < attempts {
            tokio::time::sleep(interval).await;
        }
    }

    Err(Error::BranchNeverMaterialized {
        branch: name.to_string(),
        attempts,
    })
}

/// Move an issue into progress and check out its branch
#[allow(clippy::future_not_send)]
pub async fn start_issue(
    hosting: &dyn HostingService,
    tracker: &dyn IssueTracker,
    repo: &mut dyn VersionControl,
    workflow: &WorkflowConfig,
    issue_id: &str,
    progress: &dyn ProgressCallback,
) -> Result<StartOutcome> {
    let issue = tracker.fetch_issue(issue_id).await?;
    if issue.status.is_done() {
        return Ok(StartOutcome::Rejected(Ineligibility::AlreadyClosed {
            status: issue.status.to_string(),
        }));
    }
    if repo.is_dirty()? {
        return Err(Error::DirtyWorkspace);
    }

    let transitioned = issue.status != IssueStatus::InProgress;
    if transitioned {
        tracker
            .transition(issue_id, &workflow.start_transition)
            .await?;
        info!(issue = issue_id, "issue started");
        progress
            .on_message(&format!("▶️  {issue_id} is in progress"))
            .await;
    }

    progress
        .on_message(&format!("Waiting for branch {issue_id}..."))
        .await;
    let branch = wait_for_branch(
        hosting,
        issue_id,
        Duration::from_secs(workflow.poll_interval_secs),
        workflow.poll_attempts,
    )
    .await?;

    repo.fetch(&workflow.remote)?;
    repo.checkout(&branch.name)?;
    info!(branch = %branch.name, "branch checked out");

    Ok(StartOutcome::Started {
        branch,
        transitioned,
    })
}
