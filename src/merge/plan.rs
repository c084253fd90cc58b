//! Cherry-pick planning - pure functions
//!
//! Turns an issue's fix versions into the ordered list of release branches
//! that must receive the merged commits. No I/O happens here.

use crate::release::compute_cherry_pick_branches;
use crate::types::Issue;
use tracing::warn;

/// Commits brought in by a two-parent merge commit
///
/// `from` is the mainline tip before the merge, `to` the tip of the merged
/// branch; `from..to` selects exactly the incoming commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// First parent (pre-merge mainline tip)
    pub from: String,
    /// Second parent (incoming branch tip)
    pub to: String,
}

impl CommitRange {
    /// Range from HEAD's parents; `None` unless there are exactly two
    pub fn from_parents(parents: &[String]) -> Option<Self> {
        match parents {
            [from, to] => Some(Self {
                from: from.clone(),
                to: to.clone(),
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommitRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

/// Release branches to cherry-pick onto, in order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CherryPickPlan {
    /// Target branches
    pub branches: Vec<String>,
    /// Branch names dropped because they were already planned
    pub duplicates: Vec<String>,
}

impl CherryPickPlan {
    /// Plan for an issue's fix versions
    pub fn for_issue(issue: &Issue) -> Self {
        Self::from_branches(compute_cherry_pick_branches(issue))
    }

    /// Build a plan, keeping the first occurrence of each branch
    pub fn from_branches(candidates: Vec<String>) -> Self {
        let mut plan = Self::default();
        for branch in candidates {
            if plan.branches.contains(&branch) {
                warn!(%branch, "fix versions map to the same release branch twice, picking once");
                plan.duplicates.push(branch);
            } else {
                plan.branches.push(branch);
            }
        }
        plan
    }

    /// Whether there is nothing to cherry-pick
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Git commands an operator runs to apply the plan by hand
    pub fn manual_commands(&self, range: &CommitRange, mainline: &str) -> Vec<String> {
        let mut commands = Vec::new();
        for branch in &self.branches {
            commands.push(format!("git checkout {mainline} && git pull"));
            commands.push(format!("git checkout {branch} && git pull"));
            commands.push(format!("git cherry-pick {range}"));
            commands.push("git push".to_string());
        }
        if !commands.is_empty() {
            commands.push(format!("git checkout {mainline}"));
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IssueStatus;

    fn issue(versions: &[&str]) -> Issue {
        Issue {
            id: "GIRA-7".to_string(),
            summary: String::new(),
            status: IssueStatus::InProgress,
            fix_versions: versions.iter().map(ToString::to_string).collect(),
            has_subtasks: false,
            assignee: None,
        }
    }

    #[test]
    fn test_plan_for_issue() {
        let plan = CherryPickPlan::for_issue(&issue(&["v2.0.0", "v1.9.1", "v1.9.1-acme"]));
        assert_eq!(plan.branches, vec!["release-1.9", "release-1.9-acme"]);
        assert!(plan.duplicates.is_empty());
    }

    #[test]
    fn test_plan_drops_duplicates_keeping_order() {
        let plan = CherryPickPlan::for_issue(&issue(&[
            "v1.8.2",
            "v1.9.1",
            "v2.0.0",
            "v1.8.3",
        ]));
        assert_eq!(plan.branches, vec!["release-1.8", "release-1.9"]);
        assert_eq!(plan.duplicates, vec!["release-1.8"]);
    }

    #[test]
    fn test_trunk_only_plan_is_empty() {
        assert!(CherryPickPlan::for_issue(&issue(&["v2.0.0"])).is_empty());
    }

    #[test]
    fn test_commit_range_needs_two_parents() {
        let parents = vec!["aaa".to_string(), "bbb".to_string()];
        let range = CommitRange::from_parents(&parents).unwrap();
        assert_eq!(range.to_string(), "aaa..bbb");

        assert!(CommitRange::from_parents(&parents[..1]).is_none());
        let three = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert!(CommitRange::from_parents(&three).is_none());
    }

    #[test]
    fn test_manual_commands() {
        let plan = CherryPickPlan::from_branches(vec!["release-1.9".to_string()]);
        let range = CommitRange {
            from: "aaa".to_string(),
            to: "bbb".to_string(),
        };
        let commands = plan.manual_commands(&range, "master");
        assert_eq!(
            commands,
            vec![
                "git checkout master && git pull",
                "git checkout release-1.9 && git pull",
                "git cherry-pick aaa..bbb",
                "git push",
                "git checkout master",
            ]
        );
        assert!(CherryPickPlan::default().manual_commands(&range, "master").is_empty());
    }
}
