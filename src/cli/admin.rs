//! Repository administration commands

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use dialoguer::Confirm;
use gira::error::{Error, Result};
use gira::types::Permission;
use std::path::Path;

/// Protect a branch
pub async fn run_lock_branch(
    path: &Path,
    config_path: Option<&Path>,
    branch: &str,
) -> Result<()> {
    let ctx = CommandContext::new(path, config_path)?;
    ctx.hosting.protect_branch(branch).await?;
    println!("{} Branch {} is protected", check(), branch.accent());
    Ok(())
}

/// Grant a user access to the repository
pub async fn run_add_user(
    path: &Path,
    config_path: Option<&Path>,
    username: &str,
    permission: Permission,
) -> Result<()> {
    let ctx = CommandContext::new(path, config_path)?;
    ctx.hosting.add_collaborator(username, permission).await?;
    println!(
        "{} Added {} with {} permission",
        check(),
        username.accent(),
        permission.to_string().emphasis()
    );
    Ok(())
}

/// Revoke a user's access, asking first unless `yes` is set
pub async fn run_delete_user(
    path: &Path,
    config_path: Option<&Path>,
    username: &str,
    yes: bool,
) -> Result<()> {
    let ctx = CommandContext::new(path, config_path)?;

    if !yes {
        let prompt = format!(
            "Remove {username} from {}/{}?",
            ctx.hosting.config().owner,
            ctx.hosting.config().repo
        );
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?;
        if !confirmed {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
    }

    ctx.hosting.remove_collaborator(username).await?;
    println!("{} Removed {}", check(), username.accent());
    Ok(())
}
