//! Local working copy
//!
//! [`VersionControl`] is the narrow set of git operations the merge train
//! runs against the operator's clone. [`GitRepo`] shells out to `git`.

mod git;

pub use git::GitRepo;

use crate::error::Result;

/// Local version-control operations
///
/// Implementations assume exclusive use of the working copy.
pub trait VersionControl {
    /// Whether the working copy has uncommitted changes
    fn is_dirty(&self) -> Result<bool>;

    /// Check out a branch or commit
    fn checkout(&mut self, reference: &str) -> Result<()>;

    /// Pull the current branch from its upstream
    fn pull(&mut self) -> Result<()>;

    /// Push the current branch to its upstream
    fn push(&mut self) -> Result<()>;

    /// Fetch from a remote
    fn fetch(&mut self, remote: &str) -> Result<()>;

    /// Cherry-pick a commit range (`<from>..<to>`) onto the current branch
    fn cherry_pick(&mut self, range: &str) -> Result<()>;

    /// Parent commit ids of HEAD, in order
    fn head_parents(&self) -> Result<Vec<String>>;

    /// URL of a named remote
    fn remote_url(&self, remote: &str) -> Result<String>;
}
