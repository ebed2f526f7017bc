//! A single node of the interning tree.

/// Index of a node inside the [`NodeTable`](super::NodeTable).
pub type NodeIndex = u32;

/// Index of the synthetic super-root that parents every filesystem root.
pub const SUPER_ROOT: NodeIndex = 0;

/// Reference counts saturate at this value and are frozen from then on.
pub const MAX_REFCOUNT: u16 = u16::MAX;

/// Marker prefixed to the names of absolute roots.
pub const ABSOLUTE_MARKER: char = '/';

/// Marker prefixed to the names of relative roots.
pub const RELATIVE_MARKER: char = ' ';

/// One path component, filesystem root, or the super-root.
///
/// Root names carry the absolute/relative marker as their first character
/// followed by the filesystem specifier, so `"/C:"` is the absolute root of
/// drive `C:` and `" "` is the empty relative root.
#[derive(Debug)]
pub struct Node {
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) name: Box<str>,
    /// Sorted by byte order of the child names, without duplicates.
    pub(crate) children: Vec<NodeIndex>,
    pub(crate) refcount: u16,
    pub(crate) depth: u16,
}

impl Node {
    pub(crate) fn super_root() -> Self {
        Self {
            parent: None,
            name: "superRoot".into(),
            children: Vec::new(),
            refcount: MAX_REFCOUNT,
            depth: 0,
        }
    }

    pub(crate) fn child(parent: NodeIndex, name: &str, depth: u16) -> Self {
        Self {
            parent: Some(parent),
            name: name.into(),
            children: Vec::new(),
            refcount: 1,
            depth,
        }
    }

    /// Returns the component text (or marker + filesystem for roots).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent index, `None` for the super-root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns the depth: 0 for the super-root, 1 for filesystem roots.
    #[must_use]
    pub const fn depth(&self) -> u16 {
        self.depth
    }

    /// Returns the current reference count.
    #[must_use]
    pub const fn refcount(&self) -> u16 {
        self.refcount
    }

    /// True once the count has saturated; such nodes are never reclaimed.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.refcount == MAX_REFCOUNT
    }

    /// True for filesystem roots.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.depth == 1
    }

    /// For a root node, the filesystem specifier without the marker.
    #[must_use]
    pub fn root_filesystem(&self) -> &str {
        debug_assert!(self.is_root());
        &self.name[1..]
    }

    /// For a root node, whether it is an absolute root.
    #[must_use]
    pub fn root_is_absolute(&self) -> bool {
        debug_assert!(self.is_root());
        self.name.starts_with(ABSOLUTE_MARKER)
    }

    /// Approximate heap and inline footprint of this node.
    pub(crate) fn estimated_bytes(&self) -> usize {
        std::mem::size_of::<Option<Self>>()
            + self.name.len()
            + self.children.capacity() * std::mem::size_of::<NodeIndex>()
    }
}

/// Builds the super-root child key for a root.
pub(crate) fn root_key(filesystem: &str, absolute: bool) -> String {
    let marker = if absolute {
        ABSOLUTE_MARKER
    } else {
        RELATIVE_MARKER
    };
    let mut key = String::with_capacity(filesystem.len() + 1);
    key.push(marker);
    key.push_str(filesystem);
    key
}
