//! Release-train policy - pure functions over an issue snapshot
//!
//! Decides whether an issue may be merged and which release branches must
//! receive a cherry-pick of the merged commits. No I/O happens here.

use crate::release::version::{VersionKind, VersionTag};
use crate::types::Issue;
use thiserror::Error;
use tracing::warn;

/// Why a PR or issue cannot be merged
///
/// These are expected outcomes, reported to the operator, not failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Ineligibility {
    /// PR title has no leading issue id
    #[error("PR title must start with an issue id, e.g. \"PROJ-123 Fix login\"")]
    TitleMissingIssueId,
    /// PR has no reviewer or no tester
    #[error("PR must be assigned to a reviewer as well as a tester")]
    NotAssigned,
    /// Issue is already resolved or closed
    #[error("issue is already {status}")]
    AlreadyClosed {
        /// Current status name
        status: String,
    },
    /// Issue declares no fix version
    #[error("issue has no fix version")]
    NoFixVersion,
    /// Issue has subtasks
    #[error("issue has subtasks, merge the subtasks instead")]
    HasSubtasks,
    /// More than one trunk fix version
    #[error("issue declares more than one trunk version: {}", .0.join(", "))]
    MultipleTrunkVersions(Vec<String>),
    /// Product fix without a trunk version
    #[error("product fix {} must also ship on trunk", .0.join(", "))]
    ProductFixRequiresTrunk(Vec<String>),
    /// Project fix without a trunk version and without `--force`
    #[error(
        "project fix {} needs a trunk version, or --force for a project-only merge",
        .0.join(", ")
    )]
    ProjectFixRequiresTrunkUnlessForced(Vec<String>),
}

impl Ineligibility {
    /// Whether the rejection comes from the tracker-side issue state rather
    /// than from PR metadata
    pub const fn is_issue_state(&self) -> bool {
        !matches!(self, Self::TitleMissingIssueId | Self::NotAssigned)
    }
}

/// Fix versions of an issue grouped by release-train kind
#[derive(Debug, Clone, Default)]
pub struct FixVersionSummary {
    /// Trunk versions
    pub trunk: Vec<VersionTag>,
    /// Product fix versions
    pub product_fixes: Vec<VersionTag>,
    /// Project fix versions
    pub project_fixes: Vec<VersionTag>,
    /// Versions that are not release versions
    pub skipped: Vec<String>,
}

impl FixVersionSummary {
    /// Parse and group fix versions, keeping declaration order within each group
    pub fn classify(fix_versions: &[String]) -> Self {
        let mut summary = Self::default();
        for raw in fix_versions {
            let tag = VersionTag::parse(raw);
            match tag.kind() {
                VersionKind::Trunk => summary.trunk.push(tag),
                VersionKind::ProductFix => summary.product_fixes.push(tag),
                VersionKind::ProjectFix => summary.project_fixes.push(tag),
                VersionKind::NonSemver => {
                    warn!(version = %raw, "skipping non-semver fix version");
                    summary.skipped.push(raw.clone());
                }
            }
        }
        summary
    }
}

fn raw_names(tags: &[VersionTag]) -> Vec<String> {
    tags.iter().map(|t| t.raw.clone()).collect()
}

/// Decide whether an issue may be merged
///
/// Rules apply in order and the first failure wins. Status is checked
/// before fix versions, so a closed issue without versions reports
/// `AlreadyClosed`.
///
/// `force` allows a project fix to be merged without a trunk version.
pub fn evaluate_eligibility(issue: &Issue, force: bool) -> Result<(), Ineligibility> {
    if issue.status.is_done() {
        return Err(Ineligibility::AlreadyClosed {
            status: issue.status.to_string(),
        });
    }
    if issue.fix_versions.is_empty() {
        return Err(Ineligibility::NoFixVersion);
    }
    if issue.has_subtasks {
        return Err(Ineligibility::HasSubtasks);
    }

    let summary = FixVersionSummary::classify(&issue.fix_versions);

    if summary.trunk.len() > 1 {
        return Err(Ineligibility::MultipleTrunkVersions(raw_names(
            &summary.trunk,
        )));
    }
    if summary.trunk.is_empty() {
        if !summary.product_fixes.is_empty() {
            return Err(Ineligibility::ProductFixRequiresTrunk(raw_names(
                &summary.product_fixes,
            )));
        }
        if !summary.project_fixes.is_empty() && !force {
            return Err(Ineligibility::ProjectFixRequiresTrunkUnlessForced(
                raw_names(&summary.project_fixes),
            ));
        }
    }

    Ok(())
}

/// Release branches for an issue's fix versions, in declaration order
///
/// Trunk and non-semver versions contribute nothing. Duplicates are kept;
/// [`CherryPickPlan`](crate::merge::CherryPickPlan) removes them.
pub fn compute_cherry_pick_branches(issue: &Issue) -> Vec<String> {
    issue
        .fix_versions
        .iter()
        .filter_map(|v| VersionTag::parse(v).release_branch())
        .collect()
}

/// Whether any fix version of the issue targets trunk
pub fn requires_trunk(issue: &Issue) -> bool {
    issue
        .fix_versions
        .iter()
        .any(|v| VersionTag::parse(v).is_trunk())
}
