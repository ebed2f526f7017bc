//! Ordering of path handles against each other and against raw strings.

use std::cmp::Ordering;

use super::{compare_text, CompareFlags, FileComparison};
use crate::name::{name_chain, FileName, Interpretation, Segments};
use crate::tree::{NodeIndex, NodeTable};

/// Compares two roots: filesystem first, then absolute before relative.
fn compare_roots(table: &NodeTable, x: NodeIndex, y: NodeIndex, case_insensitive: bool) -> Ordering {
    let (rx, ry) = (table.node(x), table.node(y));
    compare_text(rx.root_filesystem(), ry.root_filesystem(), case_insensitive)
        .then_with(|| ry.root_is_absolute().cmp(&rx.root_is_absolute()))
}

/// Compares two nodes, returning the result and the number of leading
/// components they share (-1 when the roots differ).
pub(crate) fn compare_nodes(
    table: &NodeTable,
    a: NodeIndex,
    b: NodeIndex,
    flags: CompareFlags,
) -> (FileComparison, i32) {
    if a == b {
        return (FileComparison::Equal, i32::from(table.depth(a)) - 1);
    }
    let case_insensitive = flags.contains(CompareFlags::CASE_INSENSITIVE);
    if flags.contains(CompareFlags::FINAL_FIRST) {
        return (compare_final_first(table, a, b, case_insensitive), -1);
    }

    let (da, db) = (table.depth(a), table.depth(b));
    let (mut x, mut y, tie) = match da.cmp(&db) {
        Ordering::Greater => (table.ancestor(a, da - db), b, FileComparison::IsChildOf),
        Ordering::Less => (a, table.ancestor(b, db - da), FileComparison::IsParentOf),
        Ordering::Equal => (a, b, FileComparison::Equal),
    };

    // Climb in lockstep until the paths meet or both reach their roots.
    let mut diverging = Vec::new();
    while x != y && table.depth(x) > 1 {
        diverging.push((x, y));
        x = table.parent(x).unwrap_or(x);
        y = table.parent(y).unwrap_or(y);
    }

    let mut common = if x == y {
        i32::from(table.depth(x)) - 1
    } else {
        let ordering = compare_roots(table, x, y, case_insensitive);
        if ordering != Ordering::Equal {
            return (FileComparison::from_ordering(ordering), -1);
        }
        0
    };

    for &(x, y) in diverging.iter().rev() {
        let ordering = compare_text(table.name(x), table.name(y), case_insensitive);
        if ordering != Ordering::Equal {
            return (FileComparison::from_ordering(ordering), common);
        }
        common += 1;
    }
    (tie, common)
}

/// Leaf-to-root comparison; the side that runs out of names first is less.
fn compare_final_first(
    table: &NodeTable,
    mut x: NodeIndex,
    mut y: NodeIndex,
    case_insensitive: bool,
) -> FileComparison {
    loop {
        let ordering = match (table.depth(x) > 1, table.depth(y) > 1) {
            (false, false) => {
                let ordering = compare_roots(table, x, y, case_insensitive);
                return FileComparison::from_ordering(ordering);
            }
            (false, true) => return FileComparison::LessThan,
            (true, false) => return FileComparison::GreaterThan,
            (true, true) => compare_text(table.name(x), table.name(y), case_insensitive),
        };
        if ordering != Ordering::Equal {
            return FileComparison::from_ordering(ordering);
        }
        x = table.parent(x).unwrap_or(x);
        y = table.parent(y).unwrap_or(y);
    }
}

impl FileName {
    /// Compares this path with `other`.
    ///
    /// By default the filesystem is compared first, then absolute paths sort
    /// before relative ones, then components from the root outward. With
    /// [`CompareFlags::FINAL_FIRST`] components are compared from the leaf
    /// inward and only `LessThan`, `Equal` and `GreaterThan` are produced.
    ///
    /// # Panics
    ///
    /// Panics if the handles have different encodings or trees.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::{CompareFlags, FileComparison, Interpretation, PathTree};
    ///
    /// let tree = PathTree::new();
    /// let a = tree.parse("a:/b", Interpretation::Portable);
    /// let b = tree.parse("a:/b/c", Interpretation::Portable);
    /// assert_eq!(a.compare(&b, CompareFlags::empty()), FileComparison::IsParentOf);
    /// assert_eq!(b.compare(&a, CompareFlags::empty()), FileComparison::IsChildOf);
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self, flags: CompareFlags) -> FileComparison {
        self.assert_compatible(other);
        compare_nodes(&self.tree().table(), self.node(), other.node(), flags).0
    }

    /// Number of leading components shared with `other`, or -1 when the
    /// filesystems or absolute markers differ.
    ///
    /// # Panics
    ///
    /// Panics if `flags` contains [`CompareFlags::FINAL_FIRST`], or if the
    /// handles have different encodings or trees.
    #[must_use]
    pub fn common_prefix_num_names(&self, other: &Self, flags: CompareFlags) -> i32 {
        assert!(
            !flags.contains(CompareFlags::FINAL_FIRST),
            "common prefix is undefined for final-first comparison"
        );
        self.assert_compatible(other);
        compare_nodes(&self.tree().table(), self.node(), other.node(), flags).1
    }

    /// True when this path equals `other` or is a proper prefix of it.
    #[must_use]
    pub fn is_parent_of(&self, other: &Self, flags: CompareFlags) -> bool {
        matches!(
            self.compare(other, flags),
            FileComparison::Equal | FileComparison::IsParentOf
        )
    }

    /// Compares this path with the text `other` parsed under `interp`,
    /// without interning it.
    ///
    /// The result is the same as parsing `other` and calling
    /// [`compare`](Self::compare).
    ///
    /// # Panics
    ///
    /// Panics if `flags` contains [`CompareFlags::FINAL_FIRST`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::{CompareFlags, FileComparison, Interpretation, PathTree};
    ///
    /// let tree = PathTree::new();
    /// let dir = tree.parse("C:/src", Interpretation::Windows);
    /// let flags = CompareFlags::CASE_INSENSITIVE;
    /// assert_eq!(
    ///     dir.compare_str(r"c:\SRC\main.c", Interpretation::Windows, flags),
    ///     FileComparison::IsParentOf
    /// );
    /// ```
    #[must_use]
    pub fn compare_str(&self, other: &str, interp: Interpretation, flags: CompareFlags) -> FileComparison {
        assert!(
            !flags.contains(CompareFlags::FINAL_FIRST),
            "string comparison does not support final-first order"
        );
        let case_insensitive = flags.contains(CompareFlags::CASE_INSENSITIVE);
        let (filesystem, absolute, mut names) = Segments::new(other, interp).into_parts();

        let table = self.tree().table();
        let root = table.node(table.root_of(self.node()));
        let ordering = compare_text(root.root_filesystem(), &filesystem, case_insensitive)
            .then_with(|| absolute.cmp(&root.root_is_absolute()));
        if ordering != Ordering::Equal {
            return FileComparison::from_ordering(ordering);
        }

        for index in name_chain(&table, self.node()) {
            let Some(name) = names.next() else {
                return FileComparison::IsChildOf;
            };
            let ordering = compare_text(table.name(index), name, case_insensitive);
            if ordering != Ordering::Equal {
                return FileComparison::from_ordering(ordering);
            }
        }
        if names.next().is_some() {
            FileComparison::IsParentOf
        } else {
            FileComparison::Equal
        }
    }
}

impl PartialOrd for FileName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FileName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other, CompareFlags::empty()).to_ordering()
    }
}
