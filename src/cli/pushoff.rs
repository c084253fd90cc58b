//! Pushoff command - move an issue's fix version to a later release

use crate::cli::context;
use crate::cli::style::{Stylize, check};
use anstream::println;
use gira::error::Result;
use gira::tracker::JiraTracker;
use gira::workflow::push_off;
use std::path::Path;

/// Run the pushoff command
///
/// Only talks to Jira, so it works outside a clone.
pub async fn run_pushoff(
    config_path: Option<&Path>,
    from: &str,
    to: &str,
    issue_id: &str,
) -> Result<()> {
    let config = context::load(config_path)?;
    let tracker = JiraTracker::new(&config.jira)?;

    let updated = push_off(&tracker, issue_id, from, to).await?;
    println!(
        "{} {} pushed off from {} to {}",
        check(),
        issue_id.accent(),
        from.muted(),
        to.accent()
    );
    println!("  {} {}", "fix versions".muted(), updated.join(", "));
    Ok(())
}
