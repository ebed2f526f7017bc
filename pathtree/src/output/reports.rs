//! Serializable report types.

use serde::Serialize;

use crate::compare::{CompareFlags, FileComparison, PathRelationship};
use crate::name::{FileName, Interpretation};
use crate::normalize::NormalizeFlags;
use crate::tree::TreeStats;

/// How one input string parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathReport {
    /// The text as given.
    pub input: String,
    /// Canonical portable form.
    pub canonical: String,
    /// Rendered in the requested output style.
    pub rendered: String,
    /// Drive letter or UNC host, empty if none.
    pub filesystem: String,
    /// Whether the path is absolute.
    pub absolute: bool,
    /// The component names, root first.
    pub components: Vec<String>,
}

impl PathReport {
    /// Describes `name`, parsed from `input`.
    #[must_use]
    pub fn new(input: &str, name: &FileName, style: Interpretation) -> Self {
        Self {
            input: input.to_string(),
            canonical: name.to_string(),
            rendered: name.to_string_style(style),
            filesystem: name.filesystem(),
            absolute: name.is_absolute(),
            components: name.names(),
        }
    }
}

/// Result of normalizing one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// The text as given.
    pub input: String,
    /// The normalized path, in the requested output style.
    pub normalized: String,
    /// Whether normalization changed the path.
    pub changed: bool,
    /// The flags applied.
    pub flags: String,
}

impl NormalizeReport {
    /// Describes the normalization of `input` into `normalized`.
    #[must_use]
    pub fn new(
        input: &str,
        normalized: &FileName,
        changed: bool,
        flags: NormalizeFlags,
        style: Interpretation,
    ) -> Self {
        Self {
            input: input.to_string(),
            normalized: normalized.to_string_style(style),
            changed,
            flags: flags.to_string(),
        }
    }
}

/// Result of comparing two paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    /// Left-hand path, canonical form.
    pub left: String,
    /// Right-hand path, canonical form.
    pub right: String,
    /// The flags applied.
    pub flags: String,
    /// Five-valued comparison of left against right.
    pub comparison: FileComparison,
    /// Ancestor/descendant view, absent for final-first comparison.
    pub relationship: Option<PathRelationship>,
    /// Leading components shared by both, or -1 across filesystems.
    pub common_prefix: i32,
    /// Hash of the left path under the flags.
    pub left_hash: u64,
    /// Hash of the right path under the flags.
    pub right_hash: u64,
}

impl ComparisonReport {
    /// Compares `left` with `right` under `flags`.
    ///
    /// # Panics
    ///
    /// Panics if the paths belong to different trees or carry different
    /// encodings.
    #[must_use]
    pub fn new(left: &FileName, right: &FileName, flags: CompareFlags) -> Self {
        let comparison = left.compare(right, flags);
        let prefix_flags = flags - CompareFlags::FINAL_FIRST;
        Self {
            left: left.to_string(),
            right: right.to_string(),
            flags: flags.to_string(),
            comparison,
            relationship: (!flags.contains(CompareFlags::FINAL_FIRST))
                .then(|| PathRelationship::from(comparison)),
            common_prefix: left.common_prefix_num_names(right, prefix_flags),
            left_hash: left.compute_hash(flags),
            right_hash: right.compute_hash(flags),
        }
    }
}

/// Result of expressing one path relative to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelativeReport {
    /// The path, as given.
    pub path: String,
    /// The directory it was made relative to, as given.
    pub to: String,
    /// The relative path (or the normalized path when nothing is shared).
    pub relative: String,
}

/// Result of validating one path for a platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// The text as given.
    pub input: String,
    /// The platform rules checked.
    pub interpretation: Interpretation,
    /// Whether the path is valid.
    pub valid: bool,
    /// Why it is not, if it is not.
    pub reason: Option<String>,
}

impl ValidationReport {
    /// Validates `name`, parsed from `input`, under `interp`.
    #[must_use]
    pub fn new(input: &str, name: &FileName, interp: Interpretation) -> Self {
        let reason = name.invalid_reason(interp);
        Self {
            input: input.to_string(),
            interpretation: interp,
            valid: reason.is_none(),
            reason,
        }
    }
}

/// Interning statistics for a batch of paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    /// Paths read.
    pub paths: usize,
    /// Distinct paths among them.
    pub distinct: usize,
    /// Total bytes of the input text.
    pub input_bytes: usize,
    /// Tree statistics after interning.
    pub tree: TreeStats,
}

/// Anything a formatter can render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Parsed paths.
    Paths(Vec<PathReport>),
    /// Normalized paths.
    Normalized(Vec<NormalizeReport>),
    /// A comparison.
    Comparison(ComparisonReport),
    /// A relative path.
    Relative(RelativeReport),
    /// Validation results.
    Validation(Vec<ValidationReport>),
    /// Interning statistics.
    Stats(StatsReport),
}
