//! Flag-aware hashing and a flag-carrying key wrapper.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use super::{CompareFlags, FileComparison};
use crate::name::{name_chain, FileName};

fn hash_text(text: &str, fold_case: bool) -> u64 {
    let mut hasher = FxHasher::default();
    for byte in text.bytes() {
        hasher.write_u8(if fold_case {
            byte.to_ascii_lowercase()
        } else {
            byte
        });
    }
    hasher.write_u8(0xff);
    hasher.finish()
}

fn combine(parent: u64, component: u64) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u64(parent);
    hasher.write_u64(component);
    hasher.finish()
}

impl FileName {
    /// Hash consistent with [`compare`](Self::compare) under `flags`.
    ///
    /// Paths that compare `Equal` under `flags` hash identically. The
    /// filesystem is always hashed case-folded; component names are folded
    /// only with [`CompareFlags::CASE_INSENSITIVE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::{CompareFlags, Interpretation, PathTree};
    ///
    /// let tree = PathTree::new();
    /// let a = tree.parse("C:/Dir/File", Interpretation::Windows);
    /// let b = tree.parse("c:/dir/file", Interpretation::Windows);
    /// let ci = CompareFlags::CASE_INSENSITIVE;
    /// assert_eq!(a.compute_hash(ci), b.compute_hash(ci));
    /// ```
    #[must_use]
    pub fn compute_hash(&self, flags: CompareFlags) -> u64 {
        let fold = flags.contains(CompareFlags::CASE_INSENSITIVE);
        let table = self.tree().table();
        let root = table.node(table.root_of(self.node()));
        let mut hash = combine(
            hash_text(root.root_filesystem(), true),
            u64::from(root.root_is_absolute()),
        );
        for index in name_chain(&table, self.node()) {
            hash = combine(hash, hash_text(table.name(index), fold));
        }
        hash
    }
}

/// A path paired with the comparison flags used for `Eq`, `Ord` and `Hash`.
///
/// Useful as a key for case-insensitive maps and sets.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use pathtree::{CompareFlags, FlaggedName, Interpretation, PathTree};
///
/// let tree = PathTree::new();
/// let mut seen = HashSet::new();
/// let ci = CompareFlags::CASE_INSENSITIVE;
/// seen.insert(FlaggedName::new(tree.parse("/Src/Main.c", Interpretation::Unix), ci));
/// assert!(seen.contains(&FlaggedName::new(tree.parse("/src/main.C", Interpretation::Unix), ci)));
/// ```
#[derive(Debug, Clone)]
pub struct FlaggedName {
    name: FileName,
    flags: CompareFlags,
}

impl FlaggedName {
    /// Wraps `name` with `flags`.
    #[must_use]
    pub const fn new(name: FileName, flags: CompareFlags) -> Self {
        Self { name, flags }
    }

    /// The wrapped path.
    #[must_use]
    pub const fn name(&self) -> &FileName {
        &self.name
    }

    /// The comparison flags.
    #[must_use]
    pub const fn flags(&self) -> CompareFlags {
        self.flags
    }

    /// Unwraps the path.
    #[must_use]
    pub fn into_name(self) -> FileName {
        self.name
    }
}

impl PartialEq for FlaggedName {
    fn eq(&self, other: &Self) -> bool {
        self.name.compare(&other.name, self.flags) == FileComparison::Equal
    }
}

impl Eq for FlaggedName {}

impl PartialOrd for FlaggedName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FlaggedName {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.flags, other.flags);
        self.name.compare(&other.name, self.flags).to_ordering()
    }
}

impl Hash for FlaggedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.name.compute_hash(self.flags));
    }
}
