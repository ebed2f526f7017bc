//! The interning tree shared by every path handle.
//!
//! Each distinct path prefix is stored exactly once. Nodes live in a
//! [`NodeTable`] addressed by [`NodeIndex`]; handles keep nodes alive through
//! explicit reference counts, so a million paths below `/usr/include` share a
//! single `usr` and a single `include` node.
//!
//! The tree is single-threaded: [`PathTree`] wraps the table in
//! `Rc<RefCell<_>>`, which keeps handles `!Send` and `!Sync`.

mod node;
mod table;

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use serde::Serialize;

pub use node::{Node, NodeIndex, ABSOLUTE_MARKER, MAX_REFCOUNT, RELATIVE_MARKER, SUPER_ROOT};
pub use table::NodeTable;

use crate::error::Result;

/// Statistics gathered by [`PathTree::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Live nodes, super-root included.
    pub live_nodes: usize,
    /// Allocated table slots.
    pub table_len: usize,
    /// Slots waiting on the free list.
    pub free_slots: usize,
    /// Depth of the deepest node.
    pub max_depth: u16,
    /// Approximate memory used by the tree, in bytes.
    pub estimated_bytes: usize,
}

/// Shared owner of one interning tree.
///
/// Cloning a `PathTree` clones the reference, not the tree.
///
/// # Examples
///
/// ```
/// use pathtree::{Interpretation, PathTree};
///
/// let tree = PathTree::new();
/// let a = tree.parse("/usr/include/stdio.h", Interpretation::Unix);
/// let b = tree.parse("/usr/include/stdlib.h", Interpretation::Unix);
/// assert_eq!(a.parent(), b.parent());
/// ```
#[derive(Clone, Default)]
pub struct PathTree {
    table: Rc<RefCell<NodeTable>>,
}

impl std::fmt::Debug for PathTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathTree")
            .field("live_nodes", &self.table().live_nodes())
            .finish()
    }
}

impl PathTree {
    /// Creates an empty tree holding only the super-root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn table(&self) -> Ref<'_, NodeTable> {
        self.table.borrow()
    }

    pub(crate) fn table_mut(&self) -> RefMut<'_, NodeTable> {
        self.table.borrow_mut()
    }

    /// True when both values refer to the same tree.
    #[must_use]
    pub fn same_tree(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.table, &other.table)
    }

    /// Number of live nodes, super-root included.
    #[must_use]
    pub fn live_nodes(&self) -> usize {
        self.table().live_nodes()
    }

    /// Walks the tree, checking its invariants, and reports its size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TreeCorruption`](crate::Error::TreeCorruption) if
    /// an invariant does not hold.
    pub fn stats(&self) -> Result<TreeStats> {
        self.table().self_check()
    }

    /// Releases excess capacity held by child arrays and the table.
    pub fn trim(&self) {
        self.table_mut().trim(None);
    }
}
