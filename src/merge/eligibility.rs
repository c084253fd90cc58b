//! PR-side merge checks

use crate::error::{Error, Result};
use crate::release::{Ineligibility, requires_trunk};
use crate::types::{Issue, PullRequest};
use regex::Regex;
use std::sync::LazyLock;

/// Leading `PROJ-123` token followed by whitespace
static ISSUE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+-[0-9]+)\s")
        .unwrap_or_else(|e| unreachable!("issue id pattern is valid: {e}"))
});

/// Extract the issue id a PR title starts with
pub fn parse_issue_id(title: &str) -> Result<String> {
    ISSUE_ID_RE
        .captures(title)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| Error::MalformedTitle(title.to_string()))
}

/// Check PR metadata: issue id in the title, reviewer and tester assigned
pub fn check_eligible(pr: &PullRequest) -> std::result::Result<(), Ineligibility> {
    if pr.issue_id().is_err() {
        return Err(Ineligibility::TitleMissingIssueId);
    }
    if pr.assignees.is_empty() || pr.testers.is_empty() {
        return Err(Ineligibility::NotAssigned);
    }
    Ok(())
}

/// Rules on the PR's target branch, independent of issue eligibility
///
/// `--force` is reserved for project-branch merges, and an issue bound for
/// trunk must go through the mainline.
pub fn check_target_branch(
    pr: &PullRequest,
    issue: &Issue,
    mainline: &str,
    force: bool,
) -> Result<()> {
    let targets_mainline = pr.base_ref == mainline;
    if targets_mainline && force {
        return Err(Error::ForceNotAllowedOnMaster(mainline.to_string()));
    }
    if !targets_mainline && requires_trunk(issue) {
        return Err(Error::TrunkRequiredButMergingToBranch {
            issue: issue.id.clone(),
            branch: pr.base_ref.clone(),
        });
    }
    Ok(())
}
