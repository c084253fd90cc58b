//! Merge command - merge a PR and carry it through the release train

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, arrow, check, link};
use anstream::println;
use gira::error::Result;
use gira::merge::{
    CherryPickStatus, MergeOptions, MergeOrchestrator, MergeOutcome, MergeReport,
};
use gira::release::Ineligibility;
use gira::types::PullRequest;
use std::path::Path;

/// Run the merge command
#[allow(clippy::future_not_send)]
pub async fn run_merge(
    path: &Path,
    config_path: Option<&Path>,
    pr_number: u64,
    force: bool,
    no_autocp: bool,
) -> Result<()> {
    let mut ctx = CommandContext::new(path, config_path)?;
    let options = MergeOptions {
        force,
        auto_cherry_pick: !no_autocp,
    };

    let progress = CliProgress::compact();
    let mut orchestrator = MergeOrchestrator::new(
        ctx.hosting.as_ref(),
        ctx.tracker.as_ref(),
        &mut ctx.repo,
        &ctx.config.workflow,
        &progress,
    );
    let outcome = orchestrator.merge_pr(pr_number, options).await?;

    match outcome {
        MergeOutcome::Rejected {
            pr,
            issue_id,
            reason,
        } => report_rejected(&pr, issue_id.as_deref(), &reason),
        MergeOutcome::Merged(report) => {
            report_merged(&report, &ctx.config.workflow.mainline);
        }
    }
    Ok(())
}

fn report_rejected(pr: &PullRequest, issue_id: Option<&str>, reason: &Ineligibility) {
    let subject = if reason.is_issue_state() {
        format!("Issue {}", issue_id.unwrap_or("?").accent())
    } else {
        format!("PR #{}", pr.number.accent())
    };
    println!(
        "{} {subject} {}",
        "Not merging:".warn(),
        reason.to_string().emphasis()
    );
    println!("  {}", link(&pr.title, &pr.html_url).muted());
}

fn report_merged(report: &MergeReport, mainline: &str) {
    println!();
    if report.already_merged {
        println!("{} PR #{} was already merged", check(), report.pr_number.accent());
    } else {
        println!("{} Merged PR #{}", check(), report.pr_number.accent());
    }
    println!("{} Resolved {}", check(), report.issue_id.accent());

    match &report.cherry_picks {
        CherryPickStatus::SkippedForced => {
            println!(
                "{}",
                "Forced merge: release branches were left alone.".muted()
            );
        }
        CherryPickStatus::NothingToPick => {
            println!("{}", "No release branch needs these commits.".muted());
        }
        CherryPickStatus::Manual { plan, range } => {
            println!();
            println!(
                "{} {}",
                "Cherry-pick".emphasis(),
                format!("{range} onto {} branch(es) by hand:", plan.branches.len()).accent()
            );
            for command in plan.manual_commands(range, mainline) {
                println!("  {} {command}", arrow());
            }
        }
        CherryPickStatus::Completed { branches, range } => {
            println!(
                "{} Cherry-picked {} onto {}",
                check(),
                range.to_string().muted(),
                branches.join(", ").accent()
            );
        }
    }
}
