//! Issue tracker access
//!
//! [`IssueTracker`] is what the merge train needs from Jira: read an issue,
//! comment on it, move it through its workflow and edit fix versions.

mod jira;

pub use jira::JiraTracker;

use crate::error::Result;
use crate::types::{Issue, IssueStatus};
use async_trait::async_trait;

/// Issue tracker trait
///
/// Single-field accessors default to a full [`fetch_issue`] so
/// implementations only need the core operations.
///
/// [`fetch_issue`]: Self::fetch_issue
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch an issue snapshot
    async fn fetch_issue(&self, id: &str) -> Result<Issue>;

    /// Add a comment to an issue
    async fn add_comment(&self, id: &str, body: &str) -> Result<()>;

    /// Apply a workflow transition by name (e.g. "Resolve Issue")
    async fn transition(&self, id: &str, transition: &str) -> Result<()>;

    /// Replace the issue's fix versions
    async fn set_fix_versions(&self, id: &str, versions: &[String]) -> Result<()>;

    /// Fix version names, in declaration order
    async fn fetch_fix_versions(&self, id: &str) -> Result<Vec<String>> {
        Ok(self.fetch_issue(id).await?.fix_versions)
    }

    /// Current workflow status
    async fn fetch_status(&self, id: &str) -> Result<IssueStatus> {
        Ok(self.fetch_issue(id).await?.status)
    }

    /// Whether the issue has subtasks
    async fn has_subtasks(&self, id: &str) -> Result<bool> {
        Ok(self.fetch_issue(id).await?.has_subtasks)
    }

    /// Assignee display name
    async fn fetch_assignee(&self, id: &str) -> Result<Option<String>> {
        Ok(self.fetch_issue(id).await?.assignee)
    }

    /// One-line summary
    async fn fetch_summary(&self, id: &str) -> Result<String> {
        Ok(self.fetch_issue(id).await?.summary)
    }
}
