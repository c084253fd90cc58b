//! Configuration for gira
//!
//! Loaded once at startup from `gira.toml` and passed to every collaborator
//! constructor. Nothing here changes after loading.

mod storage;

pub use storage::{CONFIG_FILE, config_search_paths, load_config, load_config_from};

use serde::{Deserialize, Serialize};

/// Gitee credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiteeConfig {
    /// Account name
    pub user: String,
    /// Personal access token
    pub token: String,
    /// API root override (defaults to the public Gitee API)
    #[serde(default)]
    pub api_root: Option<String>,
}

/// Jira credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Server URL, e.g. `https://jira.example.com`
    pub url: String,
    /// Account name
    pub user: String,
    /// Account password or API token
    pub passwd: String,
}

/// Branch and workflow names used by the merge train
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Mainline branch
    pub mainline: String,
    /// Git remote used for pull/push and repository detection
    pub remote: String,
    /// Jira transition applied after a merge
    pub resolve_transition: String,
    /// Jira transition applied when cherry-picking fails
    pub reopen_transition: String,
    /// Jira transition applied by `gira start`
    pub start_transition: String,
    /// Seconds between branch existence probes
    pub poll_interval_secs: u64,
    /// Branch existence probes before giving up
    pub poll_attempts: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            mainline: "master".to_string(),
            remote: "origin".to_string(),
            resolve_transition: "Resolve Issue".to_string(),
            reopen_transition: "Reopen Issue".to_string(),
            start_transition: "Start Progress".to_string(),
            poll_interval_secs: 5,
            poll_attempts: 12,
        }
    }
}

/// Complete gira configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gitee section
    pub gitee: GiteeConfig,
    /// Jira section
    pub jira: JiraConfig,
    /// Workflow section
    #[serde(default)]
    pub workflow: WorkflowConfig,
}
