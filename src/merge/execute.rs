//! Cherry-pick execution - effectful operations
//!
//! Takes a `CherryPickPlan` (created by the pure planning functions) and
//! applies the merged commit range to each release branch through the local
//! working copy.

use crate::error::Result;
use crate::merge::plan::{CherryPickPlan, CommitRange};
use crate::merge::progress::ProgressCallback;
use crate::repo::VersionControl;
use tracing::{info, warn};

/// Result of cherry-pick execution
#[derive(Debug, Clone, Default)]
pub struct CherryPickResult {
    /// Branches that received the commits and were pushed
    pub picked: Vec<String>,
    /// Branch where execution stopped (if any)
    pub failed_branch: Option<String>,
    /// Error message from the failed step (if any)
    pub error_message: Option<String>,
}

impl CherryPickResult {
    /// Check if every planned branch was picked
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed_branch.is_none()
    }
}

fn pick_onto(
    repo: &mut dyn VersionControl,
    mainline: &str,
    branch: &str,
    range: &CommitRange,
) -> Result<()> {
    repo.checkout(mainline)?;
    repo.pull()?;
    repo.checkout(branch)?;
    repo.pull()?;
    repo.cherry_pick(&range.to_string())?;
    repo.push()?;
    repo.checkout(mainline)
}

/// Execute the cherry-pick plan (EFFECTFUL)
///
/// Branches are processed in plan order. The first failing step stops the
/// run; remaining branches are not attempted.
#[allow(clippy::future_not_send)]
pub async fn execute_cherry_picks(
    plan: &CherryPickPlan,
    range: &CommitRange,
    mainline: &str,
    repo: &mut dyn VersionControl,
    progress: &dyn ProgressCallback,
) -> CherryPickResult {
    let mut result = CherryPickResult::default();

    for branch in &plan.branches {
        progress
            .on_message(&format!("🍒 Cherry-picking {range} onto {branch}"))
            .await;

        match pick_onto(repo, mainline, branch, range) {
            Ok(()) => {
                info!(%branch, %range, "cherry-picked and pushed");
                progress.on_message(&format!("✅ Pushed {branch}")).await;
                result.picked.push(branch.clone());
            }
            Err(e) => {
                warn!(%branch, error = %e, "cherry-pick failed");
                result.failed_branch = Some(branch.clone());
                result.error_message = Some(e.to_string());
                break;
            }
        }
    }

    result
}
