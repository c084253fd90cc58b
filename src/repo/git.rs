//! `git` command-line backend

use crate::error::{Error, Result};
use crate::repo::VersionControl;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// A git working copy driven through the `git` binary
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Open the working copy containing `path`
    pub fn open(path: &Path) -> Result<Self> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(path)
            .output()
            .map_err(|e| Error::Git(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            return Err(Error::Git(format!(
                "not a git repository: {}",
                path.display()
            )));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self {
            root: PathBuf::from(root),
        })
    }

    /// Root directory of the working copy
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run git with `args`, returning trimmed stdout
    fn run(&self, args: &[&str]) -> Result<String> {
        debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| Error::Git(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl VersionControl for GitRepo {
    fn is_dirty(&self) -> Result<bool> {
        let status = self.run(&["status", "--porcelain", "--untracked-files=no"])?;
        Ok(!status.is_empty())
    }

    fn checkout(&mut self, reference: &str) -> Result<()> {
        self.run(&["checkout", reference]).map(drop)
    }

    fn pull(&mut self) -> Result<()> {
        self.run(&["pull", "--ff-only"]).map(drop)
    }

    fn push(&mut self) -> Result<()> {
        self.run(&["push"]).map(drop)
    }

    fn fetch(&mut self, remote: &str) -> Result<()> {
        self.run(&["fetch", remote]).map(drop)
    }

    fn cherry_pick(&mut self, range: &str) -> Result<()> {
        self.run(&["cherry-pick", range]).map(drop)
    }

    fn head_parents(&self) -> Result<Vec<String>> {
        // "<head> <parent1> <parent2> ..."
        let line = self.run(&["rev-list", "--parents", "-n", "1", "HEAD"])?;
        Ok(line.split_whitespace().skip(1).map(String::from).collect())
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        self.run(&["remote", "get-url", remote])
    }
}
