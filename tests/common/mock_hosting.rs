//! Mock hosting service for testing

use async_trait::async_trait;
use gira::error::{Error, Result};
use gira::platform::HostingService;
use gira::types::{Branch, Collaborator, HostingConfig, Permission, PrState, PullRequest};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Hand-written mock of `HostingService`
///
/// Features:
/// - Configurable PRs and branches
/// - Branches that appear only after a number of probes
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockHostingService {
    config: HostingConfig,
    prs: Mutex<HashMap<u64, PullRequest>>,
    branches: Mutex<HashMap<String, Branch>>,
    branch_appears_after: Mutex<HashMap<String, u32>>,
    branch_probes: AtomicU32,
    collaborators: Mutex<Vec<Collaborator>>,
    // Call tracking
    fetch_pr_calls: Mutex<Vec<u64>>,
    merge_pr_calls: Mutex<Vec<u64>>,
    protect_calls: Mutex<Vec<String>>,
    add_collaborator_calls: Mutex<Vec<(String, Permission)>>,
    remove_collaborator_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_fetch_pr: Mutex<Option<String>>,
    error_on_merge_pr: Mutex<Option<String>>,
}

impl MockHostingService {
    /// Create a new mock with the given config
    pub fn with_config(config: HostingConfig) -> Self {
        Self {
            config,
            prs: Mutex::new(HashMap::new()),
            branches: Mutex::new(HashMap::new()),
            branch_appears_after: Mutex::new(HashMap::new()),
            branch_probes: AtomicU32::new(0),
            collaborators: Mutex::new(Vec::new()),
            fetch_pr_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            protect_calls: Mutex::new(Vec::new()),
            add_collaborator_calls: Mutex::new(Vec::new()),
            remove_collaborator_calls: Mutex::new(Vec::new()),
            error_on_fetch_pr: Mutex::new(None),
            error_on_merge_pr: Mutex::new(None),
        }
    }

    /// Create a mock for acme/widget on gitee.com
    pub fn new() -> Self {
        Self::with_config(super::gitee_config())
    }

    // === Setup ===

    /// Register a PR
    pub fn add_pr(&self, pr: PullRequest) {
        self.prs.lock().unwrap().insert(pr.number, pr);
    }

    /// Register a branch that exists immediately
    pub fn add_branch(&self, name: &str) {
        self.add_branch_after(name, 0);
    }

    /// Register a branch that is only visible after `probes` failed lookups
    pub fn add_branch_after(&self, name: &str, probes: u32) {
        self.branches.lock().unwrap().insert(
            name.to_string(),
            Branch {
                name: name.to_string(),
                protected: false,
                commit_sha: Some("abc123".to_string()),
                raw: format!("{{\"name\":\"{name}\"}}"),
            },
        );
        self.branch_appears_after
            .lock()
            .unwrap()
            .insert(name.to_string(), probes);
    }

    /// Register a collaborator
    pub fn add_member(&self, member: Collaborator) {
        self.collaborators.lock().unwrap().push(member);
    }

    // === Error injection ===

    /// Make `fetch_pr` return an error
    pub fn fail_fetch_pr(&self, msg: &str) {
        *self.error_on_fetch_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pr` return an error
    pub fn fail_merge_pr(&self, msg: &str) {
        *self.error_on_merge_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Call inspection ===

    pub fn get_fetch_pr_calls(&self) -> Vec<u64> {
        self.fetch_pr_calls.lock().unwrap().clone()
    }

    pub fn get_merge_pr_calls(&self) -> Vec<u64> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    pub fn get_protect_calls(&self) -> Vec<String> {
        self.protect_calls.lock().unwrap().clone()
    }

    pub fn get_add_collaborator_calls(&self) -> Vec<(String, Permission)> {
        self.add_collaborator_calls.lock().unwrap().clone()
    }

    pub fn get_remove_collaborator_calls(&self) -> Vec<String> {
        self.remove_collaborator_calls.lock().unwrap().clone()
    }

    /// Number of `fetch_branch` calls so far
    pub fn branch_probe_count(&self) -> u32 {
        self.branch_probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostingService for MockHostingService {
    async fn fetch_pr(&self, pr_number: u64) -> Result<PullRequest> {
        self.fetch_pr_calls.lock().unwrap().push(pr_number);
        if let Some(msg) = self.error_on_fetch_pr.lock().unwrap().as_ref() {
            return Err(Error::HostingApi(msg.clone()));
        }
        self.prs
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| Error::HostingApi(format!("404 Not Found: PR {pr_number}")))
    }

    async fn merge_pr(&self, pr_number: u64) -> Result<()> {
        self.merge_pr_calls.lock().unwrap().push(pr_number);
        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().as_ref() {
            return Err(Error::HostingApi(msg.clone()));
        }
        if let Some(pr) = self.prs.lock().unwrap().get_mut(&pr_number) {
            pr.state = PrState::Merged;
        }
        Ok(())
    }

    async fn fetch_branch(&self, name: &str) -> Result<Option<Branch>> {
        let probe = self.branch_probes.fetch_add(1, Ordering::SeqCst);
        let visible_after = self
            .branch_appears_after
            .lock()
            .unwrap()
            .get(name)
            .copied();
        match visible_after {
            Some(after) if probe >= after => {
                Ok(self.branches.lock().unwrap().get(name).cloned())
            }
            _ => Ok(None),
        }
    }

    async fn protect_branch(&self, name: &str) -> Result<()> {
        self.protect_calls.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn add_collaborator(&self, username: &str, permission: Permission) -> Result<()> {
        self.add_collaborator_calls
            .lock()
            .unwrap()
            .push((username.to_string(), permission));
        Ok(())
    }

    async fn remove_collaborator(&self, username: &str) -> Result<()> {
        self.remove_collaborator_calls
            .lock()
            .unwrap()
            .push(username.to_string());
        Ok(())
    }

    async fn list_collaborators(&self) -> Result<Vec<Collaborator>> {
        Ok(self.collaborators.lock().unwrap().clone())
    }

    fn config(&self) -> &HostingConfig {
        &self.config
    }
}
