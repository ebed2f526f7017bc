//! One place that owns a tree, a file system and the normalization caches.
//!
//! [`PathContext`] replaces process-wide state: the interning tree, the
//! working directory captured at first use and every memoized file-system
//! answer live here and nowhere else. Drop the context (and its handles)
//! to release all of it.

use std::path::Path;

use log::debug;

use crate::compare::CompareFlags;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::{FileKind, FileStats, FileSystem, HostFileSystem, MemoryFileSystem};
use crate::name::{Encoding, FileName, Interpretation};
use crate::normalize::{NormalizeFlags, Normalizer};
use crate::tree::{PathTree, TreeStats};

/// Owns a [`PathTree`] and the [`Normalizer`] working on it, together with
/// default parsing and normalization options.
///
/// # Examples
///
/// ```
/// use pathtree::{Interpretation, NormalizeFlags, PathContext};
///
/// let mut ctx = PathContext::in_memory();
/// let path = ctx.parse("/usr/./lib/../include", Interpretation::Unix);
/// let normalized = ctx.normalize(&path, NormalizeFlags::empty(), None)?;
/// assert_eq!(normalized.to_string(), "/usr/include");
/// # Ok::<(), pathtree::Error>(())
/// ```
#[derive(Debug)]
pub struct PathContext {
    tree: PathTree,
    normalizer: Normalizer,
    interpretation: Interpretation,
    encoding: Encoding,
    normalize_flags: NormalizeFlags,
    compare_flags: CompareFlags,
    output_style: Interpretation,
}

impl Default for PathContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PathContext {
    /// A context on the host file system with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_file_system(Box::new(HostFileSystem::new()))
    }

    /// A context on an empty in-memory file system rooted at `/`.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_file_system(Box::new(MemoryFileSystem::new()))
    }

    /// A context on the given file system with default options.
    #[must_use]
    pub fn with_file_system(fs: Box<dyn FileSystem>) -> Self {
        let tree = PathTree::new();
        let normalizer = Normalizer::new(tree.clone(), fs);
        Self {
            tree,
            normalizer,
            interpretation: Interpretation::Host,
            encoding: Encoding::SystemDefault,
            normalize_flags: NormalizeFlags::empty(),
            compare_flags: CompareFlags::empty(),
            output_style: Interpretation::Portable,
        }
    }

    /// A context on the given file system taking its defaults from `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::config::{Config, NormalizeConfig};
    /// use pathtree::fs::MemoryFileSystem;
    /// use pathtree::{Interpretation, NormalizeFlags, PathContext};
    ///
    /// let config = Config {
    ///     interpretation: Some(Interpretation::Windows),
    ///     normalize: Some(NormalizeConfig {
    ///         lowercase: Some(true),
    ///         ..Default::default()
    ///     }),
    ///     ..Default::default()
    /// };
    /// let ctx = PathContext::from_config(&config, Box::new(MemoryFileSystem::new()));
    /// assert_eq!(ctx.interpretation(), Interpretation::Windows);
    /// assert_eq!(ctx.normalize_flags(), NormalizeFlags::LOWERCASE_ALWAYS);
    /// ```
    #[must_use]
    pub fn from_config(config: &Config, fs: Box<dyn FileSystem>) -> Self {
        let mut ctx = Self::with_file_system(fs);
        ctx.interpretation = config.interpretation_or_default();
        ctx.encoding = config.encoding.unwrap_or_default();
        ctx.normalize_flags = config.normalize_flags();
        ctx.compare_flags = config.compare_flags();
        ctx.output_style = config.output_style_or_default();
        debug!(
            "path context: interpretation {}, encoding {}, normalize {}",
            ctx.interpretation, ctx.encoding, ctx.normalize_flags
        );
        ctx
    }

    /// The interning tree.
    #[must_use]
    pub const fn tree(&self) -> &PathTree {
        &self.tree
    }

    /// The normalizer and its caches.
    #[must_use]
    pub const fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Mutable access to the normalizer.
    pub fn normalizer_mut(&mut self) -> &mut Normalizer {
        &mut self.normalizer
    }

    /// The file system queries go to.
    #[must_use]
    pub fn file_system(&self) -> &dyn FileSystem {
        self.normalizer.file_system()
    }

    /// Default interpretation for [`parse_default`](Self::parse_default).
    #[must_use]
    pub const fn interpretation(&self) -> Interpretation {
        self.interpretation
    }

    /// Encoding tag given to parsed handles.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Configured normalization flags.
    #[must_use]
    pub const fn normalize_flags(&self) -> NormalizeFlags {
        self.normalize_flags
    }

    /// Configured comparison flags.
    #[must_use]
    pub const fn compare_flags(&self) -> CompareFlags {
        self.compare_flags
    }

    /// Configured rendering style.
    #[must_use]
    pub const fn output_style(&self) -> Interpretation {
        self.output_style
    }

    /// Sets the encoding tag for handles parsed from now on.
    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    /// Sets the default interpretation.
    pub fn set_interpretation(&mut self, interpretation: Interpretation) {
        self.interpretation = interpretation;
    }

    /// Parses `text` with the context's encoding.
    #[must_use]
    pub fn parse(&self, text: &str, interp: Interpretation) -> FileName {
        self.tree.parse_with_encoding(text, interp, self.encoding)
    }

    /// Parses `text` with the context's interpretation and encoding.
    #[must_use]
    pub fn parse_default(&self, text: &str) -> FileName {
        self.parse(text, self.interpretation)
    }

    /// Converts a host path to a handle.
    #[must_use]
    pub fn from_path(&self, path: &Path) -> FileName {
        self.parse(&path.to_string_lossy(), Interpretation::Host)
    }

    /// Renders `name` in the configured output style.
    #[must_use]
    pub fn render(&self, name: &FileName) -> String {
        name.to_string_style(self.output_style)
    }

    /// The working directory, queried now.
    ///
    /// # Errors
    ///
    /// See [`Normalizer::current_path`].
    pub fn current_path(&self) -> Result<FileName> {
        self.normalizer.current_path(self.encoding)
    }

    /// The working directory first seen by this context.
    ///
    /// # Errors
    ///
    /// See [`Normalizer::initial_path`].
    pub fn initial_path(&mut self) -> Result<FileName> {
        self.normalizer.initial_path(self.encoding)
    }

    /// See [`Normalizer::normalize`].
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn normalize(
        &mut self,
        name: &FileName,
        flags: NormalizeFlags,
        base: Option<&FileName>,
    ) -> Result<FileName> {
        self.normalizer.normalize(name, flags, base)
    }

    /// Normalizes with the configured flags against the initial path.
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn normalize_default(&mut self, name: &FileName) -> Result<FileName> {
        self.normalizer.normalize(name, self.normalize_flags, None)
    }

    /// See [`Normalizer::normalize_with_change`].
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn normalize_with_change(
        &mut self,
        name: &FileName,
        flags: NormalizeFlags,
        base: Option<&FileName>,
    ) -> Result<(FileName, bool)> {
        self.normalizer.normalize_with_change(name, flags, base)
    }

    /// Parses and normalizes `text` in one pass, with the context's encoding.
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn normalize_str(
        &mut self,
        text: &str,
        interp: Interpretation,
        flags: NormalizeFlags,
        base: Option<&FileName>,
    ) -> Result<FileName> {
        self.normalizer
            .normalize_str(text, interp, flags, base, self.encoding)
    }

    /// See [`Normalizer::normalize_when_complete`].
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn normalize_when_complete(
        &mut self,
        name: &FileName,
        flags: NormalizeFlags,
    ) -> Result<(FileName, bool)> {
        self.normalizer.normalize_when_complete(name, flags)
    }

    /// See [`Normalizer::make_relative`].
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn make_relative(
        &mut self,
        path: &FileName,
        to: &FileName,
        flags: CompareFlags,
        base: Option<&FileName>,
    ) -> Result<FileName> {
        self.normalizer.make_relative(path, to, flags, base)
    }

    /// See [`Normalizer::resolve_symlink`].
    ///
    /// # Errors
    ///
    /// See [`Normalizer::resolve_symlink`].
    pub fn resolve_symlink(&mut self, name: &FileName) -> Result<Option<FileName>> {
        self.normalizer.resolve_symlink(name)
    }

    /// See [`Normalizer::resolve_all_symlinks`].
    ///
    /// # Errors
    ///
    /// See [`Normalizer::resolve_all_symlinks`].
    pub fn resolve_all_symlinks(&mut self, name: &FileName) -> Result<FileName> {
        self.normalizer.resolve_all_symlinks(name)
    }

    /// See [`Normalizer::resolve_long_name`].
    ///
    /// # Errors
    ///
    /// See [`Normalizer::resolve_long_name`].
    pub fn resolve_long_name(&mut self, name: &FileName) -> Result<FileName> {
        self.normalizer.resolve_long_name(name)
    }

    /// See [`Normalizer::resolve_short_name`].
    ///
    /// # Errors
    ///
    /// See [`Normalizer::resolve_short_name`].
    pub fn resolve_short_name(&mut self, name: &FileName) -> Result<FileName> {
        self.normalizer.resolve_short_name(name)
    }

    /// See [`Normalizer::long_path_string`].
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn long_path_string(&mut self, name: &FileName) -> Result<String> {
        self.normalizer.long_path_string(name)
    }

    /// Forgets memoized normalizations and on-disk case answers.
    pub fn clear_normalize_cache(&mut self) {
        self.normalizer.clear_normalize_cache();
    }

    /// Forgets memoized symlink targets and long/short names.
    pub fn clear_symlink_cache(&mut self) {
        self.normalizer.clear_symlink_cache();
    }

    /// Metadata of `name`, following symlinks; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] for failures other than absence.
    pub fn stat(&self, name: &FileName) -> Result<Option<FileStats>> {
        let text = name.to_string();
        self.file_system()
            .stat(&text)
            .map_err(|e| Error::system("stat", text, e))
    }

    /// Metadata of `name` without following a final symlink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] for failures other than absence.
    pub fn link_stat(&self, name: &FileName) -> Result<Option<FileStats>> {
        let text = name.to_string();
        self.file_system()
            .link_stat(&text)
            .map_err(|e| Error::system("link_stat", text, e))
    }

    /// True if `name` exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] for failures other than absence.
    pub fn exists(&self, name: &FileName) -> Result<bool> {
        Ok(self.stat(name)?.is_some())
    }

    /// True if `name` is a directory (after following symlinks).
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] for failures other than absence.
    pub fn is_dir(&self, name: &FileName) -> Result<bool> {
        Ok(self.stat(name)?.is_some_and(|s| s.is_dir()))
    }

    /// True if `name` is a regular file (after following symlinks).
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] for failures other than absence.
    pub fn is_file(&self, name: &FileName) -> Result<bool> {
        Ok(self.stat(name)?.is_some_and(|s| s.is_file()))
    }

    /// The entries of directory `dir`, as handles below it, in the order
    /// the file system lists them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] if `dir` cannot be listed, including when
    /// it does not exist.
    pub fn dir_entries(&self, dir: &FileName) -> Result<Vec<FileName>> {
        let text = dir.to_string();
        let names = self
            .file_system()
            .list_directory(&text)
            .map_err(|e| Error::system("list_directory", text, e))?;
        Ok(names.iter().map(|n| dir.join_name(n)).collect())
    }

    /// Like [`dir_entries`](Self::dir_entries), sorted by name.
    ///
    /// # Errors
    ///
    /// As [`dir_entries`](Self::dir_entries).
    pub fn ordered_dir_entries(&self, dir: &FileName) -> Result<Vec<FileName>> {
        let text = dir.to_string();
        let names = self
            .file_system()
            .list_directory_ordered(&text)
            .map_err(|e| Error::system("list_directory", text, e))?;
        Ok(names.iter().map(|n| dir.join_name(n)).collect())
    }

    /// Every entry below `dir`, depth first, each directory's entries in
    /// name order. Symlinked directories are listed but not descended.
    ///
    /// # Errors
    ///
    /// As [`dir_entries`](Self::dir_entries), for `dir` or any directory
    /// below it.
    pub fn recursive_dir_entries(&self, dir: &FileName) -> Result<Vec<FileName>> {
        let mut out = Vec::new();
        let mut pending = vec![self.ordered_dir_entries(dir)?.into_iter()];
        while let Some(entries) = pending.last_mut() {
            let Some(entry) = entries.next() else {
                pending.pop();
                continue;
            };
            let descend = self
                .link_stat(&entry)?
                .is_some_and(|s| s.kind == FileKind::Directory);
            out.push(entry.clone());
            if descend {
                pending.push(self.ordered_dir_entries(&entry)?.into_iter());
            }
        }
        Ok(out)
    }

    /// Self-checks the tree and reports its size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TreeCorruption`] if an invariant does not hold.
    pub fn stats(&self) -> Result<TreeStats> {
        self.tree.stats()
    }
}
