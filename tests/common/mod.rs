//! Shared test fixtures

#![allow(dead_code)]

mod mock_hosting;
mod mock_repo;
mod mock_tracker;

pub use mock_hosting::MockHostingService;
pub use mock_repo::MockRepo;
pub use mock_tracker::MockIssueTracker;

use async_trait::async_trait;
use gira::config::WorkflowConfig;
use gira::merge::ProgressCallback;
use gira::types::{HostingConfig, Issue, IssueStatus, PrState, PullRequest};
use std::sync::Mutex;

/// Hosting coordinates used by the mocks
pub fn gitee_config() -> HostingConfig {
    HostingConfig {
        owner: "acme".to_string(),
        repo: "widget".to_string(),
        host: None,
    }
}

/// Workflow config with polling that never sleeps
pub fn workflow() -> WorkflowConfig {
    WorkflowConfig {
        poll_interval_secs: 0,
        poll_attempts: 3,
        ..WorkflowConfig::default()
    }
}

/// An open PR into `base` with a reviewer and a tester
pub fn make_pr(number: u64, title: &str, base: &str) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        state: PrState::Open,
        assignees: vec!["Alice".to_string()],
        testers: vec!["Bob".to_string()],
        base_ref: base.to_string(),
        head_ref: "feature".to_string(),
        html_url: format!("https://gitee.com/acme/widget/pulls/{number}"),
        raw: format!("{{\"number\":{number}}}"),
    }
}

/// An in-progress issue with the given fix versions
pub fn make_issue(id: &str, fix_versions: &[&str]) -> Issue {
    Issue {
        id: id.to_string(),
        summary: "Fix the widget".to_string(),
        status: IssueStatus::InProgress,
        fix_versions: fix_versions.iter().map(ToString::to_string).collect(),
        has_subtasks: false,
        assignee: Some("Alice".to_string()),
    }
}

/// Progress callback that records every message
#[derive(Default)]
pub struct RecordingProgress {
    pub messages: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    async fn on_warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}
