//! Release version tags
//!
//! Fix versions on Jira issues follow `v<major>.<minor>.<fix>[-<qualifier>]`.
//! Components are kept as the literal substrings so branch names rebuilt
//! from them round-trip leading zeros.

use regex::Regex;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v([0-9]+)\.([0-9]+)\.([0-9]+)(?:-([A-Za-z0-9]+))?$")
        .unwrap_or_else(|e| unreachable!("version pattern is valid: {e}"))
});

/// Patch component reserved for the unversioned mainline
pub const TRUNK_FIX: &str = "0";

/// A parsed fix-version string
///
/// When `is_valid` is false every component is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    /// The string this tag was parsed from
    pub raw: String,
    /// Whether `raw` matched the version pattern
    pub is_valid: bool,
    /// Major component
    pub major: String,
    /// Minor component
    pub minor: String,
    /// Fix (patch) component; `"0"` marks trunk
    pub fix: String,
    /// Qualifier after `-`, empty if absent
    pub qualifier: String,
}

/// Release-train classification of a fix version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    /// Mainline release (`fix == "0"`)
    Trunk,
    /// Patch release of the product
    ProductFix,
    /// Patch release for one customer project (has a qualifier)
    ProjectFix,
    /// Not a release version; ignored by the release train
    NonSemver,
}

impl std::fmt::Display for VersionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trunk => write!(f, "trunk"),
            Self::ProductFix => write!(f, "product fix"),
            Self::ProjectFix => write!(f, "project fix"),
            Self::NonSemver => write!(f, "non-semver"),
        }
    }
}

impl VersionTag {
    /// Parse a fix-version string. Never fails; unmatched input yields an
    /// invalid tag with empty components.
    pub fn parse(s: &str) -> Self {
        let Some(caps) = VERSION_RE.captures(s) else {
            return Self {
                raw: s.to_string(),
                is_valid: false,
                major: String::new(),
                minor: String::new(),
                fix: String::new(),
                qualifier: String::new(),
            };
        };

        let group = |i: usize| caps.get(i).map_or_else(String::new, |m| m.as_str().to_string());

        Self {
            raw: s.to_string(),
            is_valid: true,
            major: group(1),
            minor: group(2),
            fix: group(3),
            qualifier: group(4),
        }
    }

    /// Whether a qualifier suffix is present
    pub fn has_qualifier(&self) -> bool {
        !self.qualifier.is_empty()
    }

    /// Whether this is the trunk marker version
    pub fn is_trunk(&self) -> bool {
        self.is_valid && self.fix == TRUNK_FIX
    }

    /// Classify this version for the release train
    pub fn kind(&self) -> VersionKind {
        if !self.is_valid {
            VersionKind::NonSemver
        } else if self.fix == TRUNK_FIX {
            VersionKind::Trunk
        } else if self.has_qualifier() {
            VersionKind::ProjectFix
        } else {
            VersionKind::ProductFix
        }
    }

    /// Release branch that receives cherry-picks for this version
    ///
    /// `release-<major>.<minor>[-<qualifier>]`; `None` for trunk and
    /// non-semver versions.
    pub fn release_branch(&self) -> Option<String> {
        match self.kind() {
            VersionKind::Trunk | VersionKind::NonSemver => None,
            VersionKind::ProductFix => Some(format!("release-{}.{}", self.major, self.minor)),
            VersionKind::ProjectFix => Some(format!(
                "release-{}.{}-{}",
                self.major, self.minor, self.qualifier
            )),
        }
    }
}

impl std::fmt::Display for VersionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_valid {
            return write!(f, "{}", self.raw);
        }
        write!(f, "v{}.{}.{}", self.major, self.minor, self.fix)?;
        if self.has_qualifier() {
            write!(f, "-{}", self.qualifier)?;
        }
        Ok(())
    }
}
