//! Start command - put an issue in progress and check out its branch

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use async_trait::async_trait;
use gira::error::Result;
use gira::merge::ProgressCallback;
use gira::workflow::{StartOutcome, start_issue};
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

/// Progress reporter that shows waits on a spinner
struct SpinnerProgress {
    spinner: ProgressBar,
}

#[async_trait]
impl ProgressCallback for SpinnerProgress {
    async fn on_message(&self, message: &str) {
        if message.ends_with("...") {
            self.spinner.set_message(message.to_string());
            self.spinner.enable_steady_tick(Duration::from_millis(80));
        } else {
            self.spinner.suspend(|| println!("{message}"));
        }
    }

    async fn on_warning(&self, message: &str) {
        self.spinner
            .suspend(|| println!("{}", format!("⚠️  {message}").warn()));
    }
}

/// Run the start command
#[allow(clippy::future_not_send)]
pub async fn run_start(path: &Path, config_path: Option<&Path>, issue_id: &str) -> Result<()> {
    let mut ctx = CommandContext::new(path, config_path)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    let progress = SpinnerProgress {
        spinner: spinner.clone(),
    };

    let outcome = start_issue(
        ctx.hosting.as_ref(),
        ctx.tracker.as_ref(),
        &mut ctx.repo,
        &ctx.config.workflow,
        issue_id,
        &progress,
    )
    .await;
    spinner.finish_and_clear();

    match outcome? {
        StartOutcome::Rejected(reason) => {
            println!(
                "{} {} {}",
                "Not starting:".warn(),
                issue_id.accent(),
                reason
            );
        }
        StartOutcome::Started {
            branch,
            transitioned,
        } => {
            if !transitioned {
                println!("{}", format!("{issue_id} was already in progress").muted());
            }
            println!("{} On branch {}", check(), branch.name.accent());
        }
    }
    Ok(())
}
