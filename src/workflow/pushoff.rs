//! Moving an issue to a later release

use crate::error::{Error, Result};
use crate::release::VersionTag;
use crate::tracker::IssueTracker;
use tracing::info;

/// Replace fix version `from` with `to`, keeping declaration order
///
/// `to` must be a valid version. If `to` is already declared, `from` is
/// simply dropped.
pub fn push_off_versions(
    issue_id: &str,
    current: &[String],
    from: &str,
    to: &str,
) -> Result<Vec<String>> {
    if !VersionTag::parse(to).is_valid {
        return Err(Error::InvalidVersion(to.to_string()));
    }
    if !current.iter().any(|v| v == from) {
        return Err(Error::VersionNotFound {
            issue: issue_id.to_string(),
            version: from.to_string(),
        });
    }

    let already_has_target = current.iter().any(|v| v == to);
    let mut updated = Vec::with_capacity(current.len());
    for version in current {
        if version == from {
            if !already_has_target && !updated.iter().any(|v| v == to) {
                updated.push(to.to_string());
            }
        } else {
            updated.push(version.clone());
        }
    }
    Ok(updated)
}

/// Push an issue's fix version from one release to another
pub async fn push_off(
    tracker: &dyn IssueTracker,
    issue_id: &str,
    from: &str,
    to: &str,
) -> Result<Vec<String>> {
    let current = tracker.fetch_fix_versions(issue_id).await?;
    let updated = push_off_versions(issue_id, &current, from, to)?;

    tracker.set_fix_versions(issue_id, &updated).await?;
    tracker
        .add_comment(
            issue_id,
            &format!("Fix version pushed off from {from} to {to}."),
        )
        .await?;
    info!(issue = issue_id, from, to, "fix version pushed off");
    Ok(updated)
}
