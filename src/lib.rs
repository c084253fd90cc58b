//! gira - pull-request merge train for Gitee and Jira
//!
//! Merges a Gitee pull request, resolves the Jira issue named in its title,
//! and cherry-picks the merged commits onto every release branch the issue's
//! fix versions call for.
//!
//! - [`release`] - fix-version parsing and the release-train policy
//! - [`merge`] - PR checks, cherry-pick planning and the merge orchestrator
//! - [`workflow`] - starting issues and moving fix versions
//! - [`platform`], [`tracker`], [`repo`] - Gitee, Jira and git collaborators

pub mod config;
pub mod error;
pub mod merge;
pub mod platform;
pub mod release;
pub mod repo;
pub mod tracker;
pub mod types;
pub mod workflow;
