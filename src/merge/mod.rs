//! Merge engine for the release train
//!
//! Three-phase pattern:
//! 1. Gather - fetch PR and issue, check eligibility (effectful, bounded)
//! 2. Plan - derive the `CherryPickPlan` (pure, testable)
//! 3. Execute - merge, resolve, cherry-pick (effectful)

mod eligibility;
mod execute;
mod orchestrator;
mod plan;
mod progress;
mod review;

pub use eligibility::{check_eligible, check_target_branch, parse_issue_id};
pub use execute::{CherryPickResult, execute_cherry_picks};
pub use orchestrator::{
    CherryPickStatus, MergeOptions, MergeOrchestrator, MergeOutcome, MergeReport,
    sign_off_comment,
};
pub use plan::{CherryPickPlan, CommitRange};
pub use progress::{NoopProgress, ProgressCallback};
pub use review::{ReviewReport, ReviewVerdict, review_pr};
