//! The immutable, reference-counted path handle.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::parse::Segments;
use super::{Encoding, Interpretation};
use crate::tree::{NodeIndex, NodeTable, PathTree};

/// A path name interned in a [`PathTree`].
///
/// A `FileName` is a node index plus an encoding tag. Cloning and dropping
/// adjust the node's reference count; the text of shared prefixes is stored
/// once in the tree. Equality and hashing are by node identity, so two
/// handles are equal exactly when they denote the same interned path.
///
/// # Examples
///
/// ```
/// use pathtree::{Interpretation, PathTree};
///
/// let tree = PathTree::new();
/// let path = tree.parse(r"C:\src\lib\..\main.c", Interpretation::Windows);
/// assert_eq!(path.to_string(), "C:/src/lib/../main.c");
/// assert_eq!(path.num_names(), 4);
/// assert_eq!(path.final_name().as_deref(), Some("main.c"));
/// ```
pub struct FileName {
    tree: PathTree,
    node: NodeIndex,
    encoding: Encoding,
}

impl PathTree {
    /// Parses `path` under `interp` with the system default encoding.
    #[must_use]
    pub fn parse(&self, path: &str, interp: Interpretation) -> FileName {
        self.parse_with_encoding(path, interp, Encoding::SystemDefault)
    }

    /// Parses `path` under `interp`, tagging the result with `encoding`.
    #[must_use]
    pub fn parse_with_encoding(
        &self,
        path: &str,
        interp: Interpretation,
        encoding: Encoding,
    ) -> FileName {
        let (filesystem, absolute, names) = Segments::new(path, interp).into_parts();
        let mut table = self.table_mut();
        let mut node = table.root(&filesystem, absolute);
        for name in names {
            node = descend(&mut table, node, name);
        }
        drop(table);
        FileName::adopt(self.clone(), node, encoding)
    }

    /// Returns the root for `filesystem`, absolute or relative.
    #[must_use]
    pub fn root(&self, filesystem: &str, absolute: bool, encoding: Encoding) -> FileName {
        let node = self.table_mut().root(filesystem, absolute);
        FileName::adopt(self.clone(), node, encoding)
    }

    /// Returns `/`.
    #[must_use]
    pub fn absolute_root(&self, encoding: Encoding) -> FileName {
        self.root("", true, encoding)
    }

    /// Returns the empty relative path `.`.
    #[must_use]
    pub fn relative_root(&self, encoding: Encoding) -> FileName {
        self.root("", false, encoding)
    }

    /// Returns the absolute root of `filesystem`, such as `C:/`.
    #[must_use]
    pub fn named_root(&self, filesystem: &str, encoding: Encoding) -> FileName {
        self.root(filesystem, true, encoding)
    }

    /// Returns the relative root of `filesystem`, such as `C:`.
    #[must_use]
    pub fn named_relative_root(&self, filesystem: &str, encoding: Encoding) -> FileName {
        self.root(filesystem, false, encoding)
    }
}

/// Moves one counted reference from `node` to its child `name`.
fn descend(table: &mut NodeTable, node: NodeIndex, name: &str) -> NodeIndex {
    let child = table.get_or_create_child(node, name);
    table.release(node);
    child
}

impl FileName {
    /// Wraps an index whose count has already been taken for this handle.
    pub(crate) fn adopt(tree: PathTree, node: NodeIndex, encoding: Encoding) -> Self {
        Self {
            tree,
            node,
            encoding,
        }
    }

    /// Takes a new reference on `node`.
    pub(crate) fn share(tree: &PathTree, node: NodeIndex, encoding: Encoding) -> Self {
        tree.table_mut().retain(node);
        Self::adopt(tree.clone(), node, encoding)
    }

    pub(crate) const fn node(&self) -> NodeIndex {
        self.node
    }

    /// The tree this path is interned in.
    #[must_use]
    pub const fn tree(&self) -> &PathTree {
        &self.tree
    }

    /// The encoding tag.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Panics unless `other` lives in the same tree with the same encoding.
    pub(crate) fn assert_compatible(&self, other: &Self) {
        assert!(
            self.tree.same_tree(&other.tree),
            "path handles from different trees cannot be combined"
        );
        assert_eq!(
            self.encoding, other.encoding,
            "path handles with different encodings cannot be combined"
        );
    }

    /// True when the path starts at a filesystem root.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        let table = self.tree.table();
        table.node(table.root_of(self.node)).root_is_absolute()
    }

    /// The filesystem specifier, empty when there is none.
    #[must_use]
    pub fn filesystem(&self) -> String {
        let table = self.tree.table();
        table
            .node(table.root_of(self.node))
            .root_filesystem()
            .to_string()
    }

    /// True when the path has a drive letter, UNC host or `#FQN:` marker.
    #[must_use]
    pub fn has_filesystem(&self) -> bool {
        let table = self.tree.table();
        !table.node(table.root_of(self.node)).root_filesystem().is_empty()
    }

    /// Number of components after the root.
    #[must_use]
    pub fn num_names(&self) -> usize {
        usize::from(self.tree.table().depth(self.node)) - 1
    }

    /// True when the path has at least one component.
    #[must_use]
    pub fn has_names(&self) -> bool {
        self.num_names() > 0
    }

    /// True when the path is a bare root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        !self.has_names()
    }

    /// True for `.`: no filesystem, not absolute, no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_root() && !self.is_absolute() && !self.has_filesystem()
    }

    /// The last component, `None` for roots.
    #[must_use]
    pub fn final_name(&self) -> Option<String> {
        if self.is_root() {
            return None;
        }
        Some(self.tree.table().name(self.node).to_string())
    }

    /// The path without its last component, `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let parent = self.tree.table().parent(self.node)?;
        Some(Self::share(&self.tree, parent, self.encoding))
    }

    /// The root of this path.
    #[must_use]
    pub fn root(&self) -> Self {
        let root = self.tree.table().root_of(self.node);
        Self::share(&self.tree, root, self.encoding)
    }

    /// The ancestor with `count` components (`0` is the root).
    ///
    /// # Panics
    ///
    /// Panics if `count` exceeds [`num_names`](Self::num_names).
    #[must_use]
    pub fn ancestor(&self, count: usize) -> Self {
        let num = self.num_names();
        assert!(count <= num, "ancestor {count} of a path with {num} names");
        let levels = u16::try_from(num - count).unwrap_or(u16::MAX);
        let node = self.tree.table().ancestor(self.node, levels);
        Self::share(&self.tree, node, self.encoding)
    }

    /// Component names from the root outward.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let table = self.tree.table();
        name_chain(&table, self.node)
            .into_iter()
            .map(|index| table.name(index).to_string())
            .collect()
    }

    /// The same components without filesystem or absolute marker.
    #[must_use]
    pub fn relative(&self) -> Self {
        let mut out = self.tree.relative_root(self.encoding);
        out.push(self);
        out
    }

    /// This path if absolute, otherwise `base` joined with its names.
    ///
    /// # Panics
    ///
    /// Panics if `base` has a different encoding or tree.
    #[must_use]
    pub fn completed(&self, base: &Self) -> Self {
        if self.is_absolute() {
            self.clone()
        } else {
            base.join(self)
        }
    }

    /// Returns this path with one raw component appended.
    ///
    /// The name is appended verbatim: separators and `..` get no special
    /// treatment.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    #[must_use]
    pub fn join_name(&self, name: &str) -> Self {
        let mut out = self.clone();
        out.push_name(name);
        out
    }

    /// Returns this path with the components of `path` appended.
    ///
    /// Any filesystem or absolute marker in `path` is ignored.
    #[must_use]
    pub fn join_str(&self, path: &str, interp: Interpretation) -> Self {
        let mut out = self.clone();
        out.push_str(path, interp);
        out
    }

    /// Returns this path with the components of `other` appended.
    ///
    /// # Panics
    ///
    /// Panics if `other` has a different encoding or tree.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.push(other);
        out
    }

    /// Appends one raw component in place.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn push_name(&mut self, name: &str) {
        assert!(!name.is_empty(), "empty path component");
        let mut table = self.tree.table_mut();
        self.node = descend(&mut table, self.node, name);
    }

    /// Appends the components of `path` in place.
    pub fn push_str(&mut self, path: &str, interp: Interpretation) {
        let (_, _, names) = Segments::new(path, interp).into_parts();
        let mut table = self.tree.table_mut();
        for name in names {
            self.node = descend(&mut table, self.node, name);
        }
    }

    /// Appends the components of `other` in place.
    ///
    /// # Panics
    ///
    /// Panics if `other` has a different encoding or tree.
    pub fn push(&mut self, other: &Self) {
        self.assert_compatible(other);
        for name in other.names() {
            self.push_name(&name);
        }
    }

    /// Replaces the last component, or appends if this is a root.
    pub(crate) fn set_final_name(&mut self, name: &str) {
        if let Some(parent) = self.parent() {
            *self = parent.join_name(name);
        } else {
            self.push_name(name);
        }
    }

    /// Renders the path with the separator of `style`.
    ///
    /// The empty relative path renders as `.`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::{Interpretation, PathTree};
    ///
    /// let tree = PathTree::new();
    /// let path = tree.parse("c:/program files/app", Interpretation::Portable);
    /// assert_eq!(path.to_string_style(Interpretation::Windows), r"c:\program files\app");
    /// assert_eq!(tree.parse("", Interpretation::Unix).to_string(), ".");
    /// ```
    #[must_use]
    pub fn to_string_style(&self, style: Interpretation) -> String {
        let table = self.tree.table();
        let root = table.node(table.root_of(self.node));
        let filesystem = root.root_filesystem();
        let absolute = root.root_is_absolute();
        let chain = name_chain(&table, self.node);
        if chain.is_empty() && !absolute && filesystem.is_empty() {
            return ".".to_string();
        }

        let separator = style.separator();
        let mut out = String::from(filesystem);
        if absolute {
            out.push(separator);
        }
        for (i, &index) in chain.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            out.push_str(table.name(index));
        }
        out
    }

    /// Renders the `\\?\` long-path form with backslash separators.
    ///
    /// UNC paths become `\\?\UNC\host\...`. The path is rendered as is;
    /// normalize it first to get a usable long path.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::{Interpretation, PathTree};
    ///
    /// let tree = PathTree::new();
    /// let unc = tree.parse(r"\\server\share\f", Interpretation::Windows);
    /// assert_eq!(unc.to_long_path_string(), r"\\?\UNC\server\share\f");
    /// ```
    #[must_use]
    pub fn to_long_path_string(&self) -> String {
        let table = self.tree.table();
        let root = table.node(table.root_of(self.node));
        let filesystem = root.root_filesystem();

        let mut out = String::from("\\\\?\\");
        if let Some(host) = filesystem.strip_prefix("\\\\") {
            out.push_str("UNC\\");
            out.push_str(host);
        } else {
            out.push_str(filesystem);
        }
        if root.root_is_absolute() {
            out.push('\\');
        }
        for (i, index) in name_chain(&table, self.node).into_iter().enumerate() {
            if i > 0 {
                out.push('\\');
            }
            out.push_str(table.name(index));
        }
        out
    }
}

/// Component indices from the root outward, root excluded.
pub(crate) fn name_chain(table: &NodeTable, mut node: NodeIndex) -> Vec<NodeIndex> {
    let mut chain = Vec::with_capacity(usize::from(table.depth(node)));
    while table.depth(node) > 1 {
        chain.push(node);
        node = table.parent(node).unwrap_or(node);
    }
    chain.reverse();
    chain
}

impl Clone for FileName {
    fn clone(&self) -> Self {
        Self::share(&self.tree, self.node, self.encoding)
    }
}

impl Drop for FileName {
    fn drop(&mut self) {
        self.tree.table_mut().release(self.node);
    }
}

impl PartialEq for FileName {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
            && self.encoding == other.encoding
            && self.tree.same_tree(&other.tree)
    }
}

impl Eq for FileName {}

impl Hash for FileName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
        self.encoding.hash(state);
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_style(Interpretation::Portable))
    }
}

impl fmt::Debug for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FileName").field(&self.to_string()).finish()
    }
}
