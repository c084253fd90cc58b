//! Review command - preview what `gira merge` would do

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, arrow, check, link};
use anstream::println;
use gira::error::Result;
use gira::merge::{ReviewVerdict, review_pr};
use std::path::Path;

/// Run the review command
pub async fn run_review(
    path: &Path,
    config_path: Option<&Path>,
    pr_number: u64,
    force: bool,
) -> Result<()> {
    let ctx = CommandContext::new(path, config_path)?;
    let report = review_pr(
        ctx.hosting.as_ref(),
        ctx.tracker.as_ref(),
        &ctx.config.workflow.mainline,
        pr_number,
        force,
    )
    .await?;

    let pr = &report.pr;
    println!(
        "{} {}",
        format!("PR #{}", pr.number).emphasis(),
        link(&pr.title, &pr.html_url)
    );
    println!(
        "  {} {} {}",
        pr.head_ref.accent(),
        arrow(),
        pr.base_ref.accent()
    );
    println!(
        "  {} {}, {} {}",
        "reviewer".muted(),
        pr.reviewer().unwrap_or("-"),
        "tester".muted(),
        pr.tester().unwrap_or("-")
    );

    if let Some(issue) = &report.issue {
        println!();
        println!(
            "{} {} [{}]",
            issue.id.emphasis(),
            issue.summary,
            issue.status.to_string().accent()
        );
        if issue.fix_versions.is_empty() {
            println!("  {}", "no fix version".warn());
        } else {
            println!(
                "  {} {}",
                "fix versions".muted(),
                issue.fix_versions.join(", ")
            );
        }
    }

    if !report.plan.is_empty() {
        println!();
        println!("{}", "Cherry-pick onto:".emphasis());
        for branch in &report.plan.branches {
            println!("  {} {}", arrow(), branch.accent());
        }
    }

    println!();
    match &report.verdict {
        ReviewVerdict::Ready => println!("{} Ready to merge", check()),
        ReviewVerdict::Ineligible(reason) => {
            println!("{} {}", "Not eligible:".warn(), reason);
        }
        ReviewVerdict::Blocked(message) => {
            println!("{} {}", "Blocked:".error(), message);
        }
    }
    Ok(())
}
