//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by the commands that touch Gitee and
//! the local clone.

use gira::config::{Config, config_search_paths, load_config};
use gira::error::Result;
use gira::platform::{GiteeService, HostingService, parse_repo_info};
use gira::repo::{GitRepo, VersionControl};
use gira::tracker::{IssueTracker, JiraTracker};
use std::path::Path;

/// Load configuration from `--config` or the default search paths
pub fn load(config_path: Option<&Path>) -> Result<Config> {
    load_config(config_path, &config_search_paths())
}

/// Shared context for CLI commands
///
/// - Loading configuration
/// - Opening the git working copy
/// - Detecting the Gitee repository from the remote
/// - Creating the Gitee and Jira clients
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Local working copy
    pub repo: GitRepo,
    /// Gitee client
    pub hosting: Box<dyn HostingService>,
    /// Jira client
    pub tracker: Box<dyn IssueTracker>,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(path: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = load(config_path)?;

        let repo = GitRepo::open(path)?;
        let remote_url = repo.remote_url(&config.workflow.remote)?;
        let hosting_config = parse_repo_info(&remote_url)?;

        let hosting = GiteeService::new(
            config.gitee.token.clone(),
            hosting_config,
            config.gitee.api_root.as_deref(),
        )?;
        let tracker = JiraTracker::new(&config.jira)?;

        Ok(Self {
            config,
            repo,
            hosting: Box::new(hosting),
            tracker: Box::new(tracker),
        })
    }
}
