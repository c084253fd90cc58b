//! Mock issue tracker for testing

use async_trait::async_trait;
use gira::error::{Error, Result};
use gira::tracker::IssueTracker;
use gira::types::{Issue, IssueStatus};
use std::collections::HashMap;
use std::sync::Mutex;

/// Hand-written mock of `IssueTracker`
///
/// Transitions named like the default workflow move the stored issue's
/// status, so later reads see the effect.
pub struct MockIssueTracker {
    issues: Mutex<HashMap<String, Issue>>,
    // Call tracking
    comments: Mutex<Vec<(String, String)>>,
    transitions: Mutex<Vec<(String, String)>>,
    set_fix_versions_calls: Mutex<Vec<(String, Vec<String>)>>,
    // Error injection
    error_on_fetch_issue: Mutex<Option<String>>,
    error_on_transition: Mutex<HashMap<String, String>>,
    error_on_comment: Mutex<Option<(String, String)>>,
}

impl MockIssueTracker {
    pub fn new() -> Self {
        Self {
            issues: Mutex::new(HashMap::new()),
            comments: Mutex::new(Vec::new()),
            transitions: Mutex::new(Vec::new()),
            set_fix_versions_calls: Mutex::new(Vec::new()),
            error_on_fetch_issue: Mutex::new(None),
            error_on_transition: Mutex::new(HashMap::new()),
            error_on_comment: Mutex::new(None),
        }
    }

    /// Register an issue
    pub fn add_issue(&self, issue: Issue) {
        self.issues.lock().unwrap().insert(issue.id.clone(), issue);
    }

    /// Current snapshot of a stored issue
    pub fn issue(&self, id: &str) -> Issue {
        self.issues.lock().unwrap()[id].clone()
    }

    /// Make `fetch_issue` return an error
    pub fn fail_fetch_issue(&self, msg: &str) {
        *self.error_on_fetch_issue.lock().unwrap() = Some(msg.to_string());
    }

    /// Make one named transition return an error
    pub fn fail_transition(&self, transition: &str, msg: &str) {
        self.error_on_transition
            .lock()
            .unwrap()
            .insert(transition.to_string(), msg.to_string());
    }

    /// Make `add_comment` fail for bodies containing `needle`
    pub fn fail_comment_containing(&self, needle: &str, msg: &str) {
        *self.error_on_comment.lock().unwrap() = Some((needle.to_string(), msg.to_string()));
    }

    pub fn get_comments(&self) -> Vec<(String, String)> {
        self.comments.lock().unwrap().clone()
    }

    pub fn get_transitions(&self) -> Vec<(String, String)> {
        self.transitions.lock().unwrap().clone()
    }

    pub fn get_set_fix_versions_calls(&self) -> Vec<(String, Vec<String>)> {
        self.set_fix_versions_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTracker for MockIssueTracker {
    async fn fetch_issue(&self, id: &str) -> Result<Issue> {
        if let Some(msg) = self.error_on_fetch_issue.lock().unwrap().as_ref() {
            return Err(Error::TrackerApi(msg.clone()));
        }
        self.issues
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::IssueNotFound(id.to_string()))
    }

    async fn add_comment(&self, id: &str, body: &str) -> Result<()> {
        if let Some((needle, msg)) = self.error_on_comment.lock().unwrap().as_ref()
            && body.contains(needle.as_str())
        {
            return Err(Error::TrackerApi(msg.clone()));
        }
        self.comments
            .lock()
            .unwrap()
            .push((id.to_string(), body.to_string()));
        Ok(())
    }

    async fn transition(&self, id: &str, transition: &str) -> Result<()> {
        self.transitions
            .lock()
            .unwrap()
            .push((id.to_string(), transition.to_string()));
        if let Some(msg) = self.error_on_transition.lock().unwrap().get(transition) {
            return Err(Error::TrackerApi(msg.clone()));
        }

        let status = match transition {
            "Resolve Issue" => IssueStatus::Resolved,
            "Reopen Issue" => IssueStatus::Reopened,
            "Start Progress" => IssueStatus::InProgress,
            _ => return Ok(()),
        };
        if let Some(issue) = self.issues.lock().unwrap().get_mut(id) {
            issue.status = status;
        }
        Ok(())
    }

    async fn set_fix_versions(&self, id: &str, versions: &[String]) -> Result<()> {
        self.set_fix_versions_calls
            .lock()
            .unwrap()
            .push((id.to_string(), versions.to_vec()));
        if let Some(issue) = self.issues.lock().unwrap().get_mut(id) {
            issue.fix_versions = versions.to_vec();
        }
        Ok(())
    }
}
