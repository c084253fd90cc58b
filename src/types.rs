//! Core types for gira

use serde::{Deserialize, Serialize};

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrState {
    /// PR is open and can be merged
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl PrState {
    /// Map a hosting API state string
    pub fn from_api(state: &str) -> Self {
        match state {
            "merged" => Self::Merged,
            "open" | "opened" => Self::Open,
            _ => Self::Closed,
        }
    }
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// Snapshot of a pull request at fetch time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title, expected to start with an issue id
    pub title: String,
    /// Current state of the PR
    pub state: PrState,
    /// Reviewers, in assignment order
    pub assignees: Vec<String>,
    /// Testers, in assignment order
    pub testers: Vec<String>,
    /// Branch the PR merges into
    pub base_ref: String,
    /// Branch the PR merges from
    pub head_ref: String,
    /// Web URL for the PR
    pub html_url: String,
    /// Payload as returned by the hosting API
    #[serde(skip)]
    pub raw: String,
}

impl PullRequest {
    /// Issue id from the leading title token (e.g. `PROJ-123`)
    pub fn issue_id(&self) -> crate::error::Result<String> {
        crate::merge::parse_issue_id(&self.title)
    }

    /// First reviewer, if any
    pub fn reviewer(&self) -> Option<&str> {
        self.assignees.first().map(String::as_str)
    }

    /// First tester, if any
    pub fn tester(&self) -> Option<&str> {
        self.testers.first().map(String::as_str)
    }

    /// Whether the PR has already been merged
    pub fn is_merged(&self) -> bool {
        self.state == PrState::Merged
    }
}

/// Workflow status of a tracker issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueStatus {
    /// Not started
    Open,
    /// Being worked on
    InProgress,
    /// Reopened after resolution
    Reopened,
    /// Work finished
    Resolved,
    /// Issue closed
    Closed,
    /// Any other workflow status, by name
    Other(String),
}

impl IssueStatus {
    /// Map a tracker status name (case-insensitive)
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "open" | "to do" => Self::Open,
            "in progress" => Self::InProgress,
            "reopened" => Self::Reopened,
            "resolved" => Self::Resolved,
            "closed" | "done" => Self::Closed,
            _ => Self::Other(name.trim().to_string()),
        }
    }

    /// Whether the issue is resolved or closed
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Reopened => write!(f, "Reopened"),
            Self::Resolved => write!(f, "Resolved"),
            Self::Closed => write!(f, "Closed"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Snapshot of a tracker issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue key (e.g. `PROJ-123`)
    pub id: String,
    /// One-line summary
    pub summary: String,
    /// Workflow status
    pub status: IssueStatus,
    /// Fix version names, in declaration order
    pub fix_versions: Vec<String>,
    /// Whether the issue has subtasks
    pub has_subtasks: bool,
    /// Assignee display name
    pub assignee: Option<String>,
}

/// A branch on the hosting service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    /// Branch name
    pub name: String,
    /// Whether the branch is protected
    pub protected: bool,
    /// Tip commit SHA
    pub commit_sha: Option<String>,
    /// Payload as returned by the hosting API
    #[serde(skip)]
    pub raw: String,
}

/// Repository access level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    /// Read only
    Pull,
    /// Read and write
    Push,
    /// Full control
    Admin,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pull => write!(f, "pull"),
            Self::Push => write!(f, "push"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pull" => Ok(Self::Pull),
            "push" => Ok(Self::Push),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown permission {other:?} (pull, push, admin)")),
        }
    }
}

/// A repository collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborator {
    /// Login name
    pub login: String,
    /// Display name
    pub name: String,
    /// Highest permission held
    pub permission: Option<Permission>,
}

/// Hosted repository coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for gitee.com)
    pub host: Option<String>,
}
