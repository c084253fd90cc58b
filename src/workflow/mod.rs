//! Issue workflows outside of merging
//!
//! - `start` - move an issue into progress and check out its branch
//! - `pushoff` - move a fix version to a later release

mod pushoff;
mod start;

pub use pushoff::{push_off, push_off_versions};
pub use start::{StartOutcome, start_issue, wait_for_branch};
