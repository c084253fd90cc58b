//! Error types for gira

use thiserror::Error;

/// Errors produced by gira operations
///
/// Eligibility rejections are not errors; they travel as
/// [`Ineligibility`](crate::release::Ineligibility) values inside a
/// successful outcome.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file missing or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// Gitee API returned an error
    #[error("Gitee API error: {0}")]
    HostingApi(String),

    /// Jira API returned an error
    #[error("Jira API error: {0}")]
    TrackerApi(String),

    /// A collaborator could not be reached while gathering PR/issue data
    #[error("remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// Local git command failed
    #[error("git error: {0}")]
    Git(String),

    /// PR title does not start with an issue id
    #[error("PR title does not start with an issue id: {0:?}")]
    MalformedTitle(String),

    /// Issue does not exist in the tracker
    #[error("issue not found: {0}")]
    IssueNotFound(String),

    /// Fix version could not be parsed as `v<major>.<minor>.<fix>[-<qualifier>]`
    #[error("invalid version {0:?}: expected v<major>.<minor>.<fix>[-<qualifier>]")]
    InvalidVersion(String),

    /// Fix version is not declared on the issue
    #[error("issue {issue} has no fix version {version}")]
    VersionNotFound {
        /// Issue id
        issue: String,
        /// Version that was looked up
        version: String,
    },

    /// Working copy has uncommitted changes
    #[error("working copy has uncommitted changes, commit or stash them first")]
    DirtyWorkspace,

    /// `--force` was used on a PR targeting the mainline
    #[error("--force is only allowed for merges into project branches, not {0}")]
    ForceNotAllowedOnMaster(String),

    /// Trunk-bound issue merged into a side branch
    #[error(
        "issue {issue} targets trunk but PR merges into {branch}; split the issue per branch"
    )]
    TrunkRequiredButMergingToBranch {
        /// Issue id
        issue: String,
        /// PR target branch
        branch: String,
    },

    /// Hosting merge API call failed
    #[error("failed to merge PR #{number}: {message}")]
    MergeFailed {
        /// PR number
        number: u64,
        /// Underlying error message
        message: String,
        /// Raw PR payload, for operator diagnosis
        raw: String,
    },

    /// Checkout/pull of the mainline failed after a merge
    #[error("failed to sync {branch}: {message}")]
    SyncFailed {
        /// Mainline branch
        branch: String,
        /// Underlying error message
        message: String,
    },

    /// Mainline HEAD is not a two-parent merge commit
    #[error("HEAD of {branch} is not a merge commit ({parents} parent(s))")]
    NotAMergeCommit {
        /// Mainline branch
        branch: String,
        /// Parent count found at HEAD
        parents: usize,
    },

    /// Cherry-picking onto a release branch failed
    #[error("cherry-pick onto {branch} failed: {message}")]
    CherryPickFailed {
        /// Branch where the failure happened
        branch: String,
        /// Underlying git error message
        message: String,
        /// Branches already picked before the failure
        picked: Vec<String>,
        /// Whether the issue was reopened successfully
        reopened: bool,
    },

    /// Tracking branch did not appear before polling gave up
    #[error("branch {branch} did not appear after {attempts} attempts")]
    BranchNeverMaterialized {
        /// Branch that was polled for
        branch: String,
        /// Number of probes made
        attempts: u32,
    },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Process exit code for this error
    ///
    /// Codes distinguish the abort points of a merge so callers can tell
    /// "nothing to do" (0) from failures needing manual intervention.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MergeFailed { .. } => 2,
            Self::NotAMergeCommit { .. } => 3,
            Self::ForceNotAllowedOnMaster(_) => 4,
            Self::TrunkRequiredButMergingToBranch { .. } => 5,
            Self::DirtyWorkspace => 10,
            Self::SyncFailed { .. } => 11,
            Self::CherryPickFailed { .. } => 12,
            Self::BranchNeverMaterialized { .. } => 13,
            _ => 1,
        }
    }
}

/// Result type alias for gira operations
pub type Result<T> = std::result::Result<T, Error>;
