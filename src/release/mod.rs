//! Release-train rules
//!
//! - `version` - parsing of `v<major>.<minor>.<fix>[-<qualifier>]` fix versions
//! - `policy` - merge eligibility and cherry-pick branch derivation

mod policy;
mod version;

pub use policy::{
    FixVersionSummary, Ineligibility, compute_cherry_pick_branches, evaluate_eligibility,
    requires_trunk,
};
pub use version::{TRUNK_FIX, VersionKind, VersionTag};
