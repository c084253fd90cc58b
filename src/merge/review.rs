//! Read-only merge preview

use crate::error::{Error, Result};
use crate::merge::eligibility::{check_eligible, check_target_branch};
use crate::merge::plan::CherryPickPlan;
use crate::platform::HostingService;
use crate::release::{Ineligibility, evaluate_eligibility};
use crate::tracker::IssueTracker;
use crate::types::{Issue, PullRequest};

/// Verdict of a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewVerdict {
    /// `gira merge` would proceed
    Ready,
    /// Merge would be refused as not eligible
    Ineligible(Ineligibility),
    /// Merge would abort on a target-branch rule
    Blocked(String),
}

/// What `gira merge` would do with a PR
#[derive(Debug, Clone)]
pub struct ReviewReport {
    /// PR snapshot
    pub pr: PullRequest,
    /// Issue snapshot, when the title names one
    pub issue: Option<Issue>,
    /// Verdict
    pub verdict: ReviewVerdict,
    /// Release branches that would be cherry-picked
    pub plan: CherryPickPlan,
}

/// Check a PR the way `merge_pr` does, without changing anything
pub async fn review_pr(
    hosting: &dyn HostingService,
    tracker: &dyn IssueTracker,
    mainline: &str,
    pr_number: u64,
    force: bool,
) -> Result<ReviewReport> {
    let pr = hosting.fetch_pr(pr_number).await?;

    if let Err(reason) = check_eligible(&pr) {
        return Ok(ReviewReport {
            pr,
            issue: None,
            verdict: ReviewVerdict::Ineligible(reason),
            plan: CherryPickPlan::default(),
        });
    }

    let issue = tracker.fetch_issue(&pr.issue_id()?).await?;
    let plan = CherryPickPlan::for_issue(&issue);

    let verdict = match evaluate_eligibility(&issue, force) {
        Err(reason) => ReviewVerdict::Ineligible(reason),
        Ok(()) => match check_target_branch(&pr, &issue, mainline, force) {
            Ok(()) => ReviewVerdict::Ready,
            Err(e @ (Error::ForceNotAllowedOnMaster(_)
            | Error::TrunkRequiredButMergingToBranch { .. })) => {
                ReviewVerdict::Blocked(e.to_string())
            }
            Err(e) => return Err(e),
        },
    };

    Ok(ReviewReport {
        pr,
        issue: Some(issue),
        verdict,
        plan,
    })
}
