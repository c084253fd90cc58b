//! Merge orchestration
//!
//! Runs one PR through the release train:
//! workspace check, fetch PR and issue, eligibility, target-branch guard,
//! remote merge, issue resolution, mainline sync, cherry-pick plan and
//! execution. A failed cherry-pick reopens the issue; nothing else is
//! rolled back.

use crate::config::WorkflowConfig;
use crate::error::{Error, Result};
use crate::merge::eligibility::{check_eligible, check_target_branch};
use crate::merge::execute::execute_cherry_picks;
use crate::merge::plan::{CherryPickPlan, CommitRange};
use crate::merge::progress::ProgressCallback;
use crate::platform::HostingService;
use crate::release::{Ineligibility, evaluate_eligibility};
use crate::repo::VersionControl;
use crate::tracker::IssueTracker;
use crate::types::{Issue, PullRequest};
use tracing::{info, warn};

/// Options for a merge
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions {
    /// Allow a project-fix-only issue into a project branch
    pub force: bool,
    /// Cherry-pick onto release branches instead of printing instructions
    pub auto_cherry_pick: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            force: false,
            auto_cherry_pick: true,
        }
    }
}

/// What happened to the release branches after the merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CherryPickStatus {
    /// Forced merges leave release branches to the caller
    SkippedForced,
    /// No release branch needs the commits
    NothingToPick,
    /// Plan printed for the operator to apply
    Manual {
        /// Branches to pick onto
        plan: CherryPickPlan,
        /// Commits to pick
        range: CommitRange,
    },
    /// Every branch picked and pushed
    Completed {
        /// Branches picked
        branches: Vec<String>,
        /// Commits picked
        range: CommitRange,
    },
}

/// Summary of a completed merge
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// PR number
    pub pr_number: u64,
    /// Issue the PR belongs to
    pub issue_id: String,
    /// PR was merged before this run
    pub already_merged: bool,
    /// Fix versions read back after resolving the issue
    pub fix_versions: Vec<String>,
    /// Release branch handling
    pub cherry_picks: CherryPickStatus,
}

/// Outcome of `merge_pr` that is not an error
#[derive(Debug, Clone)]
pub enum MergeOutcome {
    /// PR or issue is not eligible; nothing was changed
    Rejected {
        /// PR snapshot
        pr: Box<PullRequest>,
        /// Issue id, when the title carried one
        issue_id: Option<String>,
        /// Why the merge was refused
        reason: Ineligibility,
    },
    /// PR merged and issue resolved
    Merged(MergeReport),
}

impl MergeOutcome {
    /// Whether the PR was merged
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged(_))
    }
}

/// Comment posted on the issue after a merge
pub fn sign_off_comment(pr: &PullRequest) -> String {
    format!(
        "PR {} signed off by {} and {}.\n{}",
        pr.number,
        pr.reviewer().unwrap_or("(nobody)"),
        pr.tester().unwrap_or("(nobody)"),
        pr.html_url
    )
}

fn unavailable(e: Error) -> Error {
    match e {
        Error::Http(_) | Error::HostingApi(_) | Error::TrackerApi(_) => {
            Error::RemoteUnavailable(e.to_string())
        }
        other => other,
    }
}

/// Drives a single PR merge against the three collaborators
pub struct MergeOrchestrator<'a> {
    hosting: &'a dyn HostingService,
    tracker: &'a dyn IssueTracker,
    repo: &'a mut dyn VersionControl,
    workflow: &'a WorkflowConfig,
    progress: &'a dyn ProgressCallback,
}

impl<'a> MergeOrchestrator<'a> {
    /// Create an orchestrator
    pub fn new(
        hosting: &'a dyn HostingService,
        tracker: &'a dyn IssueTracker,
        repo: &'a mut dyn VersionControl,
        workflow: &'a WorkflowConfig,
        progress: &'a dyn ProgressCallback,
    ) -> Self {
        Self {
            hosting,
            tracker,
            repo,
            workflow,
            progress,
        }
    }

    /// Merge a PR and carry its commits to the release branches
    #[allow(clippy::future_not_send)]
    pub async fn merge_pr(
        &mut self,
        pr_number: u64,
        options: MergeOptions,
    ) -> Result<MergeOutcome> {
        if self.repo.is_dirty()? {
            return Err(Error::DirtyWorkspace);
        }

        let pr = self.hosting.fetch_pr(pr_number).await.map_err(unavailable)?;

        if let Err(reason) = check_eligible(&pr) {
            info!(pr_number, %reason, "PR not eligible");
            return Ok(MergeOutcome::Rejected {
                issue_id: pr.issue_id().ok(),
                pr: Box::new(pr),
                reason,
            });
        }
        let issue_id = pr.issue_id()?;

        let issue = self
            .tracker
            .fetch_issue(&issue_id)
            .await
            .map_err(unavailable)?;

        if let Err(reason) = evaluate_eligibility(&issue, options.force) {
            info!(pr_number, issue = %issue_id, %reason, "issue not eligible");
            return Ok(MergeOutcome::Rejected {
                pr: Box::new(pr),
                issue_id: Some(issue_id),
                reason,
            });
        }

        check_target_branch(&pr, &issue, &self.workflow.mainline, options.force)?;

        let already_merged = pr.is_merged();
        if already_merged {
            self.progress
                .on_message(&format!("PR #{pr_number} already merged"))
                .await;
        } else {
            self.progress
                .on_message(&format!("🔀 Merging PR #{pr_number}: {}", pr.title))
                .await;
            self.hosting
                .merge_pr(pr_number)
                .await
                .map_err(|e| Error::MergeFailed {
                    number: pr_number,
                    message: e.to_string(),
                    raw: pr.raw.clone(),
                })?;
            info!(pr_number, "PR merged");
        }

        let fix_versions = self.resolve_issue(&pr, &issue_id).await?;

        let mut report = MergeReport {
            pr_number,
            issue_id: issue_id.clone(),
            already_merged,
            fix_versions,
            cherry_picks: CherryPickStatus::SkippedForced,
        };

        if options.force {
            self.progress
                .on_warning("Forced merge: release branches are not cherry-picked")
                .await;
            return Ok(MergeOutcome::Merged(report));
        }

        let range = self.sync_mainline()?;
        let plan = CherryPickPlan::for_issue(&issue);

        report.cherry_picks = if plan.is_empty() {
            CherryPickStatus::NothingToPick
        } else if options.auto_cherry_pick {
            self.run_cherry_picks(&issue, &plan, range, pr_number).await?
        } else {
            CherryPickStatus::Manual { plan, range }
        };

        Ok(MergeOutcome::Merged(report))
    }

    /// Comment, resolve, and read back the fix versions
    async fn resolve_issue(&self, pr: &PullRequest, issue_id: &str) -> Result<Vec<String>> {
        self.tracker
            .add_comment(issue_id, &sign_off_comment(pr))
            .await?;
        self.tracker
            .transition(issue_id, &self.workflow.resolve_transition)
            .await?;
        info!(issue = issue_id, "issue resolved");
        self.progress
            .on_message(&format!("✅ {issue_id} resolved"))
            .await;

        let fix_versions = self.tracker.fetch_fix_versions(issue_id).await?;
        if fix_versions.is_empty() {
            warn!(issue = issue_id, "resolved issue has no fix version");
            self.progress
                .on_warning(&format!("{issue_id} has NO fix version, set one in Jira"))
                .await;
        } else {
            self.progress
                .on_message(&format!("Fix versions: {}", fix_versions.join(", ")))
                .await;
        }
        Ok(fix_versions)
    }

    /// Bring the local mainline up to date and derive the merged range
    fn sync_mainline(&mut self) -> Result<CommitRange> {
        let mainline = self.workflow.mainline.clone();
        let sync_failed = |message: String| Error::SyncFailed {
            branch: mainline.clone(),
            message,
        };

        if self.repo.is_dirty().map_err(|e| sync_failed(e.to_string()))? {
            return Err(sync_failed(
                "working copy has uncommitted changes".to_string(),
            ));
        }
        self.repo
            .checkout(&mainline)
            .and_then(|()| self.repo.pull())
            .map_err(|e| sync_failed(e.to_string()))?;

        let parents = self.repo.head_parents()?;
        CommitRange::from_parents(&parents).ok_or(Error::NotAMergeCommit {
            branch: mainline.clone(),
            parents: parents.len(),
        })
    }

    /// Execute the plan, reopening the issue if any branch fails
    #[allow(clippy::future_not_send)]
    async fn run_cherry_picks(
        &mut self,
        issue: &Issue,
        plan: &CherryPickPlan,
        range: CommitRange,
        pr_number: u64,
    ) -> Result<CherryPickStatus> {
        let result = execute_cherry_picks(
            plan,
            &range,
            &self.workflow.mainline,
            &mut *self.repo,
            self.progress,
        )
        .await;

        if result.is_success() {
            return Ok(CherryPickStatus::Completed {
                branches: result.picked,
                range,
            });
        }
        let branch = result.failed_branch.unwrap_or_default();
        let message = result.error_message.unwrap_or_default();

        let reopened = self
            .reopen_issue(&issue.id, pr_number, &branch, &range)
            .await;

        Err(Error::CherryPickFailed {
            branch,
            message,
            picked: result.picked,
            reopened,
        })
    }

    /// Walk the issue back from Resolved; failures are reported, not raised
    ///
    /// Only the transition decides whether the issue counts as reopened. The
    /// explanatory comment is best effort.
    async fn reopen_issue(
        &self,
        issue_id: &str,
        pr_number: u64,
        branch: &str,
        range: &CommitRange,
    ) -> bool {
        let reopened = match self
            .tracker
            .transition(issue_id, &self.workflow.reopen_transition)
            .await
        {
            Ok(()) => {
                info!(issue = issue_id, "issue reopened after failed cherry-pick");
                self.progress
                    .on_warning(&format!("{issue_id} reopened"))
                    .await;
                true
            }
            Err(e) => {
                warn!(issue = issue_id, error = %e, "failed to reopen issue");
                self.progress
                    .on_warning(&format!("Failed to reopen {issue_id}: {e}"))
                    .await;
                false
            }
        };

        let comment = format!(
            "Cherry-picking PR {pr_number} ({range}) onto {branch} failed. \
             The working copy may be left on {branch} mid cherry-pick. \
             Reopened until the release branches are updated by hand."
        );
        if let Err(e) = self.tracker.add_comment(issue_id, &comment).await {
            warn!(issue = issue_id, error = %e, "failed to comment on reopened issue");
            self.progress
                .on_warning(&format!("Failed to comment on {issue_id}: {e}"))
                .await;
        }

        reopened
    }
}
