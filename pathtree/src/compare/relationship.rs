//! Path relationship checking.
//!
//! A coarse, four-valued view of [`FileComparison`] for callers that only
//! care whether one path lies beneath another.

use serde::Serialize;

use super::{CompareFlags, FileComparison};
use crate::name::FileName;

/// Relationship between two paths.
///
/// # Examples
///
/// ```
/// use pathtree::{CompareFlags, Interpretation, PathRelationship, PathTree};
///
/// let tree = PathTree::new();
/// let parent = tree.parse("/home/user", Interpretation::Unix);
/// let child = tree.parse("/home/user/project", Interpretation::Unix);
///
/// assert_eq!(
///     PathRelationship::between(&parent, &child, CompareFlags::empty()),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathRelationship {
    /// The first path is an ancestor of the second.
    Ancestor,

    /// The first path is a descendant of the second.
    Descendant,

    /// The paths are the same.
    Same,

    /// Neither path is beneath the other.
    Unrelated,
}

impl From<FileComparison> for PathRelationship {
    fn from(comparison: FileComparison) -> Self {
        match comparison {
            FileComparison::IsParentOf => Self::Ancestor,
            FileComparison::IsChildOf => Self::Descendant,
            FileComparison::Equal => Self::Same,
            FileComparison::LessThan | FileComparison::GreaterThan => Self::Unrelated,
        }
    }
}

impl std::fmt::Display for PathRelationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Ancestor => "ancestor",
            Self::Descendant => "descendant",
            Self::Same => "same",
            Self::Unrelated => "unrelated",
        })
    }
}

impl PathRelationship {
    /// Determine the relationship between two paths under `flags`.
    ///
    /// The paths are compared structurally as they are; normalize them first
    /// when `..` components or differing case should not matter.
    ///
    /// # Panics
    ///
    /// Panics if `flags` contains [`CompareFlags::FINAL_FIRST`], which has
    /// no notion of prefixes.
    #[must_use]
    pub fn between(path1: &FileName, path2: &FileName, flags: CompareFlags) -> Self {
        assert!(
            !flags.contains(CompareFlags::FINAL_FIRST),
            "relationships are undefined for final-first comparison"
        );
        path1.compare(path2, flags).into()
    }

    /// Check if the relationship is hierarchical (not unrelated).
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::PathRelationship;
    ///
    /// assert!(PathRelationship::Ancestor.is_hierarchical());
    /// assert!(PathRelationship::Same.is_hierarchical());
    /// assert!(!PathRelationship::Unrelated.is_hierarchical());
    /// ```
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Self::Ancestor | Self::Descendant | Self::Same)
    }

    /// Check if a path is within a directory (descendant or same).
    #[must_use]
    pub fn is_within(path: &FileName, directory: &FileName, flags: CompareFlags) -> bool {
        matches!(
            Self::between(path, directory, flags),
            Self::Descendant | Self::Same
        )
    }

    /// Check if a path contains another path (ancestor or same).
    #[must_use]
    pub fn contains(path: &FileName, other: &FileName, flags: CompareFlags) -> bool {
        matches!(
            Self::between(path, other, flags),
            Self::Ancestor | Self::Same
        )
    }

    /// Get a human-readable description of the relationship.
    #[must_use]
    pub fn description(&self, path1: &FileName, path2: &FileName) -> String {
        match self {
            Self::Ancestor => format!("{path1} is an ancestor of {path2}"),
            Self::Descendant => format!("{path1} is a descendant of {path2}"),
            Self::Same => format!("{path1} and {path2} are the same path"),
            Self::Unrelated => format!("{path1} and {path2} are unrelated paths"),
        }
    }
}
