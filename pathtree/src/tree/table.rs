//! Index-addressed node storage with free-slot reuse.

use std::collections::VecDeque;

use super::node::{root_key, Node, NodeIndex, MAX_REFCOUNT, SUPER_ROOT};
use super::TreeStats;
use crate::error::{Error, Result};

/// Storage for every live node of one interning tree.
///
/// Slot 0 holds the super-root. Freed slots go onto a free list and are
/// reused before the table grows, except when the freed slot is the last
/// one, in which case the table shrinks.
#[derive(Debug)]
pub struct NodeTable {
    slots: Vec<Option<Node>>,
    free: Vec<NodeIndex>,
}

impl Default for NodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTable {
    /// Creates a table holding only the super-root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Node::super_root())],
            free: Vec::new(),
        }
    }

    /// Returns the node stored at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is empty.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &Node {
        match self.slots.get(index as usize) {
            Some(Some(node)) => node,
            _ => panic!("path tree: access to dead node {index}"),
        }
    }

    fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        match self.slots.get_mut(index as usize) {
            Some(Some(node)) => node,
            _ => panic!("path tree: access to dead node {index}"),
        }
    }

    /// Returns the parent index of `index`.
    #[must_use]
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.node(index).parent
    }

    /// Returns the component text of `index`.
    #[must_use]
    pub fn name(&self, index: NodeIndex) -> &str {
        &self.node(index).name
    }

    /// Returns the depth of `index` (roots are at depth 1).
    #[must_use]
    pub fn depth(&self, index: NodeIndex) -> u16 {
        self.node(index).depth
    }

    /// Walks up to the filesystem root containing `index`.
    #[must_use]
    pub fn root_of(&self, mut index: NodeIndex) -> NodeIndex {
        while self.depth(index) > 1 {
            index = self.node(index).parent.unwrap_or(SUPER_ROOT);
        }
        index
    }

    /// Walks up `levels` parents from `index`.
    #[must_use]
    pub fn ancestor(&self, mut index: NodeIndex, levels: u16) -> NodeIndex {
        for _ in 0..levels {
            index = self.node(index).parent.unwrap_or(SUPER_ROOT);
        }
        index
    }

    /// Number of live nodes, super-root included.
    #[must_use]
    pub fn live_nodes(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots currently allocated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when only the super-root is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_nodes() == 1
    }

    /// Gets or creates the root for `filesystem`, returning a counted index.
    pub fn root(&mut self, filesystem: &str, absolute: bool) -> NodeIndex {
        let key = root_key(filesystem, absolute);
        self.get_or_create_child(SUPER_ROOT, &key)
    }

    /// Finds `name` among the children of `parent` without counting it.
    #[must_use]
    pub fn find_child(&self, parent: NodeIndex, name: &str) -> Option<NodeIndex> {
        let node = self.node(parent);
        node.children
            .binary_search_by(|&child| self.name(child).cmp(name))
            .ok()
            .map(|pos| node.children[pos])
    }

    /// Returns the counted child `name` of `parent`, creating it if needed.
    ///
    /// A new child starts with a count of one and adds one to its parent;
    /// an existing child has its count incremented.
    ///
    /// # Panics
    ///
    /// Panics if the new node's depth would exceed `u16::MAX`.
    pub fn get_or_create_child(&mut self, parent: NodeIndex, name: &str) -> NodeIndex {
        let search = {
            let node = self.node(parent);
            node.children
                .binary_search_by(|&child| self.name(child).cmp(name))
        };
        match search {
            Ok(pos) => {
                let child = self.node(parent).children[pos];
                self.retain(child);
                child
            }
            Err(pos) => {
                let depth = self
                    .depth(parent)
                    .checked_add(1)
                    .unwrap_or_else(|| panic!("path tree: depth overflow below {name:?}"));
                let index = self.allocate(Node::child(parent, name, depth));
                self.node_mut(parent).children.insert(pos, index);
                self.retain(parent);
                log::trace!("path tree: created node {index} {name:?} at depth {depth}");
                index
            }
        }
    }

    fn allocate(&mut self, node: Node) -> NodeIndex {
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(node);
            return index;
        }
        let index = NodeIndex::try_from(self.slots.len())
            .unwrap_or_else(|_| panic!("path tree: node table exhausted"));
        self.slots.push(Some(node));
        index
    }

    /// Increments the count of `index`, saturating at `u16::MAX`.
    pub fn retain(&mut self, index: NodeIndex) {
        let node = self.node_mut(index);
        if node.refcount < MAX_REFCOUNT {
            node.refcount += 1;
        }
    }

    /// Decrements the count of `index`, reclaiming nodes that reach zero.
    ///
    /// Reclaiming a node removes it from its parent, which releases the
    /// parent in turn. Frozen nodes are never reclaimed.
    ///
    /// # Panics
    ///
    /// Panics on structural violations: releasing a dead node, or a
    /// reclaimed node missing from its parent's children.
    pub fn release(&mut self, index: NodeIndex) {
        let mut current = index;
        loop {
            let node = self.node_mut(current);
            if node.refcount == MAX_REFCOUNT {
                return;
            }
            node.refcount -= 1;
            if node.refcount > 0 {
                return;
            }
            match self.destroy(current) {
                Some(parent) => current = parent,
                None => return,
            }
        }
    }

    /// Removes a zero-count node and returns its parent for release.
    fn destroy(&mut self, index: NodeIndex) -> Option<NodeIndex> {
        let (parent, pos) = {
            let node = self.node(index);
            assert!(
                node.children.is_empty(),
                "path tree: destroying node {index} that still has children"
            );
            let parent = node.parent?;
            let siblings = &self.node(parent).children;
            let pos = siblings
                .binary_search_by(|&child| self.name(child).cmp(node.name()))
                .ok()
                .filter(|&pos| siblings[pos] == index)
                .unwrap_or_else(|| {
                    panic!("path tree: node {index} {:?} missing from its parent", node.name())
                });
            (parent, pos)
        };
        self.node_mut(parent).children.remove(pos);
        self.slots[index as usize] = None;

        if index as usize == self.slots.len() - 1 {
            self.slots.pop();
        } else {
            self.free.push(index);
        }
        Some(parent)
    }

    /// Verifies the structural invariants and gathers statistics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TreeCorruption`] describing the first violation.
    pub fn self_check(&self) -> Result<TreeStats> {
        let corrupt = |details: String| Error::TreeCorruption { details };

        let mut reached = 0usize;
        let mut max_depth = 0u16;
        let mut bytes = self.slots.capacity() * std::mem::size_of::<Option<Node>>()
            + self.free.capacity() * std::mem::size_of::<NodeIndex>();
        let mut queue = VecDeque::from([SUPER_ROOT]);

        while let Some(index) = queue.pop_front() {
            let Some(Some(node)) = self.slots.get(index as usize) else {
                return Err(corrupt(format!("node {index} is referenced but dead")));
            };
            reached += 1;
            max_depth = max_depth.max(node.depth);
            bytes += node.estimated_bytes() - std::mem::size_of::<Option<Node>>();

            if !node.is_frozen() && usize::from(node.refcount) < node.children.len() {
                return Err(corrupt(format!(
                    "node {index} has count {} but {} children",
                    node.refcount,
                    node.children.len()
                )));
            }

            let mut previous: Option<&str> = None;
            for &child in &node.children {
                let Some(Some(child_node)) = self.slots.get(child as usize) else {
                    return Err(corrupt(format!("child {child} of node {index} is dead")));
                };
                if child_node.parent != Some(index) {
                    return Err(corrupt(format!("child {child} does not point back to {index}")));
                }
                if child_node.depth != node.depth + 1 {
                    return Err(corrupt(format!("child {child} has depth {}", child_node.depth)));
                }
                if previous.is_some_and(|prev| prev >= child_node.name()) {
                    return Err(corrupt(format!("children of node {index} are not sorted")));
                }
                previous = Some(child_node.name());
                queue.push_back(child);
            }
        }

        for &index in &self.free {
            if matches!(self.slots.get(index as usize), Some(Some(_)) | None) {
                return Err(corrupt(format!("free slot {index} is not empty")));
            }
        }
        let live = self.live_nodes();
        if reached != live {
            return Err(corrupt(format!(
                "{reached} nodes reachable but {live} slots occupied"
            )));
        }

        Ok(TreeStats {
            live_nodes: live,
            table_len: self.slots.len(),
            free_slots: self.free.len(),
            max_depth,
            estimated_bytes: bytes,
        })
    }

    /// Shrinks child arrays to fit, below `start` or for the whole tree.
    pub fn trim(&mut self, start: Option<NodeIndex>) {
        let mut stack = vec![start.unwrap_or(SUPER_ROOT)];
        while let Some(index) = stack.pop() {
            let node = self.node_mut(index);
            node.children.shrink_to_fit();
            stack.extend_from_slice(&node.children);
        }
        if start.is_none() {
            self.slots.shrink_to_fit();
            self.free.shrink_to_fit();
        }
    }
}
