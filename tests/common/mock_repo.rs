//! Mock working copy for testing

use gira::error::{Error, Result};
use gira::repo::VersionControl;
use std::collections::VecDeque;
use std::sync::Mutex;

/// In-memory `VersionControl` that logs every operation
///
/// Operations are recorded as the git command they stand for, e.g.
/// `"checkout master"` or `"cherry-pick a..b"`.
pub struct MockRepo {
    current: String,
    dirty: Mutex<VecDeque<bool>>,
    parents: Vec<String>,
    ops: Vec<String>,
    fail_cherry_pick_on: Option<String>,
    fail_pull: bool,
}

impl MockRepo {
    /// Clean working copy on master whose HEAD is a two-parent merge
    pub fn new() -> Self {
        Self {
            current: "master".to_string(),
            dirty: Mutex::new(VecDeque::new()),
            parents: vec!["aaa111".to_string(), "bbb222".to_string()],
            ops: Vec::new(),
            fail_cherry_pick_on: None,
            fail_pull: false,
        }
    }

    /// Answer successive `is_dirty` calls; clean once exhausted
    pub fn with_dirty_sequence(mut self, answers: &[bool]) -> Self {
        self.dirty = Mutex::new(answers.iter().copied().collect());
        self
    }

    /// Parents reported for HEAD
    pub fn with_parents(mut self, parents: &[&str]) -> Self {
        self.parents = parents.iter().map(ToString::to_string).collect();
        self
    }

    /// Make cherry-picks onto `branch` conflict
    pub fn failing_cherry_pick_on(mut self, branch: &str) -> Self {
        self.fail_cherry_pick_on = Some(branch.to_string());
        self
    }

    /// Make every pull fail
    pub fn failing_pull(mut self) -> Self {
        self.fail_pull = true;
        self
    }

    /// Operations performed so far
    pub fn ops(&self) -> &[String] {
        &self.ops
    }

    /// Branches a cherry-pick was attempted on, in order
    pub fn picked_onto(&self) -> Vec<String> {
        let mut branches = Vec::new();
        let mut current = String::new();
        for op in &self.ops {
            if let Some(branch) = op.strip_prefix("checkout ") {
                current = branch.to_string();
            } else if op.starts_with("cherry-pick ") {
                branches.push(current.clone());
            }
        }
        branches
    }

    pub fn current_branch(&self) -> &str {
        &self.current
    }
}

impl VersionControl for MockRepo {
    fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty.lock().unwrap().pop_front().unwrap_or(false))
    }

    fn checkout(&mut self, reference: &str) -> Result<()> {
        self.ops.push(format!("checkout {reference}"));
        self.current = reference.to_string();
        Ok(())
    }

    fn pull(&mut self) -> Result<()> {
        self.ops.push("pull".to_string());
        if self.fail_pull {
            return Err(Error::Git("git pull --ff-only: not possible to fast-forward".to_string()));
        }
        Ok(())
    }

    fn push(&mut self) -> Result<()> {
        self.ops.push("push".to_string());
        Ok(())
    }

    fn fetch(&mut self, remote: &str) -> Result<()> {
        self.ops.push(format!("fetch {remote}"));
        Ok(())
    }

    fn cherry_pick(&mut self, range: &str) -> Result<()> {
        self.ops.push(format!("cherry-pick {range}"));
        if self.fail_cherry_pick_on.as_deref() == Some(self.current.as_str()) {
            return Err(Error::Git(format!("git cherry-pick {range}: conflict")));
        }
        Ok(())
    }

    fn head_parents(&self) -> Result<Vec<String>> {
        Ok(self.parents.clone())
    }

    fn remote_url(&self, _remote: &str) -> Result<String> {
        Ok("git@gitee.com:acme/widget.git".to_string())
    }
}
