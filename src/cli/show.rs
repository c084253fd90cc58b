//! Show command - inspect branches, collaborators and PRs

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, arrow, link};
use anstream::println;
use gira::error::Result;
use std::path::Path;

/// What to show
#[derive(Debug, Clone)]
pub enum ShowTarget {
    /// A branch by name
    Branch(String),
    /// Repository collaborators
    Team,
    /// A pull request by number
    Pr(u64),
}

/// Run the show command
pub async fn run_show(
    path: &Path,
    config_path: Option<&Path>,
    target: ShowTarget,
    full: bool,
) -> Result<()> {
    let ctx = CommandContext::new(path, config_path)?;
    let hosting = ctx.hosting.as_ref();

    match target {
        ShowTarget::Branch(name) => {
            let Some(branch) = hosting.fetch_branch(&name).await? else {
                println!("{}", format!("No branch named {name}").muted());
                return Ok(());
            };
            if full {
                println!("{}", branch.raw);
                return Ok(());
            }
            let lock = if branch.protected {
                "protected".warn()
            } else {
                "unprotected".muted()
            };
            println!("{} [{lock}]", branch.name.emphasis());
            if let Some(sha) = &branch.commit_sha {
                println!("  {} {}", "head".muted(), sha);
            }
        }
        ShowTarget::Team => {
            let team = hosting.list_collaborators().await?;
            if team.is_empty() {
                println!("{}", "No collaborators".muted());
            }
            for member in team {
                let permission = member
                    .permission
                    .map_or_else(|| "-".to_string(), |p| p.to_string());
                println!(
                    "  {} {} ({}) {}",
                    arrow(),
                    member.login.accent(),
                    member.name,
                    permission.muted()
                );
            }
        }
        ShowTarget::Pr(number) => {
            let pr = hosting.fetch_pr(number).await?;
            if full {
                println!("{}", pr.raw);
                return Ok(());
            }
            println!(
                "{} {}",
                format!("PR #{}", pr.number).emphasis(),
                link(&pr.title, &pr.html_url)
            );
            println!("  {} {}", "state".muted(), pr.state);
            println!(
                "  {} {} {} {}",
                "branches".muted(),
                pr.head_ref.accent(),
                arrow(),
                pr.base_ref.accent()
            );
            println!("  {} {}", "assignees".muted(), pr.assignees.join(", "));
            println!("  {} {}", "testers".muted(), pr.testers.join(", "));
        }
    }
    Ok(())
}
