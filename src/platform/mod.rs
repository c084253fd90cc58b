//! Hosting service for pull requests, branches and collaborators
//!
//! The merge train only needs a narrow slice of the hosting API, captured by
//! [`HostingService`]. [`GiteeService`] is the production implementation.

mod detection;
mod gitee;

pub use detection::parse_repo_info;
pub use gitee::{GITEE_API_ROOT, GiteeService};

use crate::error::Result;
use crate::types::{Branch, Collaborator, HostingConfig, Permission, PullRequest};
use async_trait::async_trait;

/// Hosting service trait for PR and repository operations
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Fetch a PR snapshot
    async fn fetch_pr(&self, pr_number: u64) -> Result<PullRequest>;

    /// Merge a PR
    async fn merge_pr(&self, pr_number: u64) -> Result<()>;

    /// Look up a branch; `Ok(None)` if it does not exist
    async fn fetch_branch(&self, name: &str) -> Result<Option<Branch>>;

    /// Protect a branch against direct pushes
    async fn protect_branch(&self, name: &str) -> Result<()>;

    /// Grant a user access to the repository
    async fn add_collaborator(&self, username: &str, permission: Permission) -> Result<()>;

    /// Revoke a user's access to the repository
    async fn remove_collaborator(&self, username: &str) -> Result<()>;

    /// List repository collaborators
    async fn list_collaborators(&self) -> Result<Vec<Collaborator>>;

    /// Repository coordinates
    fn config(&self) -> &HostingConfig;

    /// Web page of the repository
    fn web_url(&self) -> String {
        let config = self.config();
        let host = config.host.as_deref().unwrap_or("gitee.com");
        format!("https://{host}/{}/{}", config.owner, config.repo)
    }
}
