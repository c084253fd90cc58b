//! CLI command implementations

pub mod admin;
pub mod context;
pub mod merge;
pub mod pushoff;
pub mod review;
pub mod show;
pub mod start;
pub mod style;
pub mod web;

use anstream::{eprintln, println};
use async_trait::async_trait;
use gira::error::Error;
use gira::merge::ProgressCallback;
use style::Stylize;

/// Progress printer for interactive use
#[derive(Debug, Clone, Copy, Default)]
pub struct CliProgress;

impl CliProgress {
    /// One line per event
    pub const fn compact() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        println!("{message}");
    }

    async fn on_warning(&self, message: &str) {
        println!("{}", format!("⚠️  {message}").warn());
    }
}

/// Print an error with whatever context the operator needs to act on it
pub fn report_error(error: &Error) {
    if let Error::MergeFailed { raw, .. } = error {
        eprintln!("{raw}");
        eprintln!();
        eprintln!();
    }

    eprintln!("{} {error}", "Error:".error());

    match error {
        Error::CherryPickFailed {
            branch,
            picked,
            reopened,
            ..
        } => {
            eprintln!(
                "   Working copy may be left on {} mid cherry-pick; run {} or resolve it.",
                branch.accent(),
                "git cherry-pick --abort".emphasis()
            );
            if !picked.is_empty() {
                eprintln!("   Already picked: {}", picked.join(", ").accent());
            }
            if *reopened {
                eprintln!(
                    "{}",
                    "   Issue reopened; finish the cherry-picks by hand.".muted()
                );
            } else {
                eprintln!(
                    "{}",
                    "   Issue could NOT be reopened; reopen it in Jira.".warn()
                );
            }
        }
        Error::TrunkRequiredButMergingToBranch { .. } => {
            eprintln!(
                "{}",
                "   Split the issue: one issue for trunk, one per project branch.".muted()
            );
        }
        Error::SyncFailed { .. } | Error::NotAMergeCommit { .. } => {
            eprintln!(
                "{}",
                "   The PR is merged and the issue resolved; cherry-pick by hand.".muted()
            );
        }
        _ => {}
    }
}
