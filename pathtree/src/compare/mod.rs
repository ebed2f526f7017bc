//! Structural comparison and hashing of path handles.
//!
//! Comparison walks the interning tree instead of the rendered strings, so
//! a shared prefix is compared by identity and only the diverging components
//! are looked at. The five-valued [`FileComparison`] result distinguishes a
//! proper prefix (`IsParentOf`) from an ordinary `LessThan`.

mod hash;
mod order;
#[cfg(all(test, feature = "property-tests"))]
mod proptests;
mod relationship;

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

use serde::Serialize;

pub use hash::FlaggedName;
pub use relationship::PathRelationship;

bitflags::bitflags! {
    /// Options for [`FileName::compare`](crate::FileName::compare) and
    /// [`FileName::compute_hash`](crate::FileName::compute_hash).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CompareFlags: u8 {
        /// Fold ASCII case in filesystems and component names.
        const CASE_INSENSITIVE = 1;
        /// Compare from the last component toward the root.
        const FINAL_FIRST = 1 << 1;
    }
}

/// Result of comparing two paths.
///
/// The variants are ordered: `LessThan < IsParentOf < Equal < IsChildOf <
/// GreaterThan`, and negation swaps the two sides.
///
/// # Examples
///
/// ```
/// use pathtree::FileComparison;
///
/// assert_eq!(-FileComparison::IsParentOf, FileComparison::IsChildOf);
/// assert!(FileComparison::IsParentOf.is_less());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileComparison {
    /// Sorts before, and is not a prefix of, the other path.
    LessThan,
    /// Is a proper prefix of the other path.
    IsParentOf,
    /// Denotes the same path.
    Equal,
    /// Has the other path as a proper prefix.
    IsChildOf,
    /// Sorts after, and is not an extension of, the other path.
    GreaterThan,
}

impl FileComparison {
    /// The comparison seen from the other side.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::LessThan => Self::GreaterThan,
            Self::IsParentOf => Self::IsChildOf,
            Self::Equal => Self::Equal,
            Self::IsChildOf => Self::IsParentOf,
            Self::GreaterThan => Self::LessThan,
        }
    }

    /// Collapses to a plain three-way ordering.
    #[must_use]
    pub const fn to_ordering(self) -> Ordering {
        match self {
            Self::LessThan | Self::IsParentOf => Ordering::Less,
            Self::Equal => Ordering::Equal,
            Self::IsChildOf | Self::GreaterThan => Ordering::Greater,
        }
    }

    /// Numeric form, from -2 (`LessThan`) to 2 (`GreaterThan`).
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Self::LessThan => -2,
            Self::IsParentOf => -1,
            Self::Equal => 0,
            Self::IsChildOf => 1,
            Self::GreaterThan => 2,
        }
    }

    /// True for `LessThan` and `IsParentOf`.
    #[must_use]
    pub const fn is_less(self) -> bool {
        matches!(self, Self::LessThan | Self::IsParentOf)
    }

    pub(crate) const fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::LessThan,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::GreaterThan,
        }
    }
}

impl Neg for FileComparison {
    type Output = Self;

    fn neg(self) -> Self {
        self.reverse()
    }
}

impl fmt::Display for CompareFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        bitflags::parser::to_writer(self, f)
    }
}

impl fmt::Display for FileComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LessThan => write!(f, "less-than"),
            Self::IsParentOf => write!(f, "is-parent-of"),
            Self::Equal => write!(f, "equal"),
            Self::IsChildOf => write!(f, "is-child-of"),
            Self::GreaterThan => write!(f, "greater-than"),
        }
    }
}

/// Orders two texts bytewise, folding ASCII case when asked.
pub(crate) fn compare_text(a: &str, b: &str, case_insensitive: bool) -> Ordering {
    if case_insensitive {
        a.bytes()
            .map(|c| c.to_ascii_lowercase())
            .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
    } else {
        a.cmp(b)
    }
}
