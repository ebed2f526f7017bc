use log::{debug, trace};

use super::cache::Caches;
use super::NormalizeFlags;
use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::name::{Encoding, FileName, Interpretation, Segments};
use crate::tree::PathTree;

/// Chained symlink indirections followed before giving up.
pub const MAX_SYMLINK_DEPTH: usize = 32;

/// Turns path handles into canonical absolute handles.
///
/// A normalizer owns a [`FileSystem`] and the memoization tables for every
/// query it makes. Results stay cached until
/// [`clear_normalize_cache`](Self::clear_normalize_cache) or
/// [`clear_symlink_cache`](Self::clear_symlink_cache) is called, even if the
/// file system changes in between.
pub struct Normalizer {
    tree: PathTree,
    fs: Box<dyn FileSystem>,
    caches: Caches,
    initial: [Option<FileName>; 2],
    /// Nesting of renormalizations triggered by symlink targets.
    renormalizing: usize,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("tree", &self.tree)
            .field("cached", &self.caches.len())
            .finish_non_exhaustive()
    }
}

fn same_filesystem(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

impl Normalizer {
    /// Creates a normalizer interning into `tree` and querying `fs`.
    #[must_use]
    pub fn new(tree: PathTree, fs: Box<dyn FileSystem>) -> Self {
        Self {
            tree,
            fs,
            caches: Caches::default(),
            initial: [None, None],
            renormalizing: 0,
        }
    }

    /// The tree results are interned in.
    #[must_use]
    pub const fn tree(&self) -> &PathTree {
        &self.tree
    }

    /// The file system queries go to.
    #[must_use]
    pub fn file_system(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Number of memoized answers across all caches.
    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.caches.len()
    }

    fn parse_os(&self, text: &str, encoding: Encoding) -> FileName {
        self.tree
            .parse_with_encoding(text, self.fs.interpretation(), encoding)
    }

    /// The process working directory, queried now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] if the working directory is unavailable.
    pub fn current_path(&self, encoding: Encoding) -> Result<FileName> {
        let cwd = self
            .fs
            .current_dir()
            .map_err(|e| Error::system("current_dir", ".", e))?;
        Ok(self.parse_os(&cwd, encoding))
    }

    /// The working directory as first seen by this normalizer.
    ///
    /// Queried once per encoding and reused; it is the default base for
    /// completing relative paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] if the first query fails.
    pub fn initial_path(&mut self, encoding: Encoding) -> Result<FileName> {
        if let Some(path) = &self.initial[encoding.slot()] {
            return Ok(path.clone());
        }
        let path = self.current_path(encoding)?;
        debug!("initial path ({encoding}): {path}");
        self.initial[encoding.slot()] = Some(path.clone());
        Ok(path)
    }

    /// Normalizes `name`, completing it against `base` (or the initial path).
    ///
    /// # Errors
    ///
    /// Returns [`Error::SymlinkLoop`] if symlinks nest too deeply and
    /// [`Error::System`] if a file-system query fails.
    ///
    /// # Panics
    ///
    /// Panics if `base` is relative or its encoding differs from `name`'s.
    pub fn normalize(
        &mut self,
        name: &FileName,
        flags: NormalizeFlags,
        base: Option<&FileName>,
    ) -> Result<FileName> {
        Ok(self.normalize_with_change(name, flags, base)?.0)
    }

    /// Like [`normalize`](Self::normalize), also reporting whether the
    /// result differs from `name`. Completing a relative path always counts
    /// as a change.
    ///
    /// # Errors
    ///
    /// As [`normalize`](Self::normalize).
    ///
    /// # Panics
    ///
    /// As [`normalize`](Self::normalize).
    pub fn normalize_with_change(
        &mut self,
        name: &FileName,
        flags: NormalizeFlags,
        base: Option<&FileName>,
    ) -> Result<(FileName, bool)> {
        assert!(
            name.tree().same_tree(&self.tree),
            "path handle belongs to a different tree"
        );
        let encoding = name.encoding();
        let base_given = base.is_some();
        let base = match base {
            Some(base) => {
                name.assert_compatible(base);
                assert!(base.is_absolute(), "normalization base must be absolute");
                base.clone()
            }
            None => self.initial_path(encoding)?,
        };

        if !name.is_absolute() {
            if name.has_filesystem() && !same_filesystem(&name.filesystem(), &base.filesystem()) {
                let completed = self.complete_on_drive(name, &base)?;
                let (out, _) = self.normalize_when_complete(&completed, flags)?;
                return Ok((out, true));
            }
            let mut out = if base_given {
                base
            } else {
                self.normalize_when_complete(&base, flags)?.0
            };
            for component in name.names() {
                self.normalized_append(&mut out, &component, flags)?;
            }
            return Ok((out, true));
        }

        let mut work = name.clone();
        let mut changed = false;
        if !name.has_filesystem() && base.has_filesystem() {
            let filesystem = base.filesystem();
            work = self.tree.named_root(&filesystem, encoding).join(name);
            changed = true;
        }
        let (out, recased) = self.normalize_when_complete(&work, flags)?;
        Ok((out, changed || recased))
    }

    /// Completes a drive-relative path whose drive is not the base's.
    fn complete_on_drive(&self, name: &FileName, base: &FileName) -> Result<FileName> {
        let text = name.to_string();
        let full = self
            .fs
            .drive_full_path(&text)
            .map_err(|e| Error::system("drive_full_path", &text, e))?;
        Ok(match full {
            Some(full) => {
                self.tree
                    .parse_with_encoding(&full, Interpretation::Windows, name.encoding())
            }
            None => {
                // No per-drive directories: keep the drive letter as a name.
                let reinterpreted =
                    self.tree
                        .parse_with_encoding(&text, Interpretation::Unix, name.encoding());
                base.join(&reinterpreted)
            }
        })
    }

    /// Parses and normalizes `text` in one pass, without interning the
    /// prefixes that `..` components discard.
    ///
    /// Gives the same result as parsing and then calling
    /// [`normalize`](Self::normalize).
    ///
    /// # Errors
    ///
    /// As [`normalize`](Self::normalize).
    ///
    /// # Panics
    ///
    /// Panics if `base` is relative or not tagged with `encoding`.
    pub fn normalize_str(
        &mut self,
        text: &str,
        interp: Interpretation,
        flags: NormalizeFlags,
        base: Option<&FileName>,
        encoding: Encoding,
    ) -> Result<FileName> {
        if let Some(base) = base {
            assert!(
                base.tree().same_tree(&self.tree),
                "path handle belongs to a different tree"
            );
            assert_eq!(
                base.encoding(),
                encoding,
                "path handles with different encodings cannot be combined"
            );
        }
        let (filesystem, absolute, components) = Segments::new(text, interp).into_parts();

        let mut work = if absolute {
            let filesystem = if filesystem.is_empty() {
                match base {
                    Some(base) => base.filesystem(),
                    None => self.initial_path(encoding)?.filesystem(),
                }
            } else {
                filesystem.into_owned()
            };
            self.tree
                .named_root(&flags.recase_filesystem(&filesystem), encoding)
        } else if !filesystem.is_empty() {
            let name = self.tree.parse_with_encoding(text, interp, encoding);
            return self.normalize(&name, flags, base);
        } else {
            match base {
                Some(base) => {
                    assert!(base.is_absolute(), "normalization base must be absolute");
                    base.clone()
                }
                None => {
                    let initial = self.initial_path(encoding)?;
                    self.normalize_when_complete(&initial, flags)?.0
                }
            }
        };
        for component in components {
            self.normalized_append(&mut work, component, flags)?;
        }
        Ok(work)
    }

    /// Normalizes an already complete (absolute) path.
    ///
    /// Results are memoized per flag set, keyed by the input after the
    /// filesystem has been re-cased. Folding starts at the deepest ancestor
    /// already in the cache.
    ///
    /// # Errors
    ///
    /// As [`normalize`](Self::normalize).
    ///
    /// # Panics
    ///
    /// Panics if `name` is relative.
    pub fn normalize_when_complete(
        &mut self,
        name: &FileName,
        flags: NormalizeFlags,
    ) -> Result<(FileName, bool)> {
        assert!(
            name.is_absolute(),
            "normalize_when_complete needs an absolute path, got {name}"
        );
        let mut work = name.clone();
        let mut recased = false;
        if work.has_filesystem() && flags.recases_filesystem() {
            let filesystem = work.filesystem();
            let target = flags.recase_filesystem(&filesystem);
            if target != filesystem {
                work = self.tree.named_root(&target, work.encoding()).join(&work);
                recased = true;
            }
        }
        if work.is_root() {
            return Ok((work, recased));
        }

        // Uncached ancestors, deepest first.
        let mut pending = Vec::new();
        let mut cursor = work;
        let (mut folded, mut changed) = loop {
            if let Some(hit) = self.caches.normalized(flags, &cursor) {
                break hit;
            }
            let Some(parent) = cursor.parent() else {
                break (cursor, false);
            };
            pending.push(cursor);
            cursor = parent;
        };
        if !pending.is_empty() {
            trace!("normalizing {} uncached components ({flags})", pending.len());
        }
        while let Some(path) = pending.pop() {
            let Some(component) = path.final_name() else {
                continue;
            };
            self.normalized_append(&mut folded, &component, flags)?;
            changed = folded != path;
            self.caches
                .insert_normalized(flags, path, (folded.clone(), changed));
        }
        Ok((folded, changed || recased))
    }

    /// Appends one component to an already normalized path.
    fn normalized_append(
        &mut self,
        path: &mut FileName,
        component: &str,
        flags: NormalizeFlags,
    ) -> Result<()> {
        if component == ".." && !flags.contains(NormalizeFlags::PRESERVE_RELATIVE) {
            // The parent of a symlink is the parent of its target.
            if !flags.contains(NormalizeFlags::RESOLVE_SYMLINKS) && self.resolve_chain(path)? {
                *path = self.renormalize(path, flags)?;
            }
            if let Some(parent) = path.parent() {
                *path = parent;
            }
        } else if flags.contains(NormalizeFlags::LOWERCASE_ALWAYS) {
            path.push_name(&component.to_ascii_lowercase());
        } else if flags.contains(NormalizeFlags::NORMALIZE_CASE) {
            let on_disk = self.on_disk_case(path, component)?;
            path.push_name(on_disk.as_deref().unwrap_or(component));
        } else {
            path.push_name(component);
        }

        if flags.contains(NormalizeFlags::RESOLVE_SYMLINKS) && self.resolve_chain(path)? {
            *path = self.renormalize(path, flags)?;
        }
        if flags.intersects(NormalizeFlags::LONG_NAME | NormalizeFlags::SHORT_NAME) {
            let short = !flags.contains(NormalizeFlags::LONG_NAME);
            if self.resolve_long_or_short(path, short)?
                && flags.contains(NormalizeFlags::LOWERCASE_ALWAYS)
            {
                if let Some(last) = path.final_name() {
                    let lower = last.to_ascii_lowercase();
                    if lower != last {
                        path.set_final_name(&lower);
                    }
                }
            }
        }
        Ok(())
    }

    /// Normalizes a symlink target, bounding how deep targets may nest.
    fn renormalize(&mut self, target: &FileName, flags: NormalizeFlags) -> Result<FileName> {
        if self.renormalizing >= MAX_SYMLINK_DEPTH {
            return Err(Error::SymlinkLoop {
                path: target.to_string(),
                limit: MAX_SYMLINK_DEPTH,
            });
        }
        self.renormalizing += 1;
        let result = if target.is_absolute() {
            self.normalize_when_complete(target, flags).map(|(out, _)| out)
        } else {
            self.normalize(target, flags, None)
        };
        self.renormalizing -= 1;
        result
    }

    /// The on-disk spelling of `component` inside the normalized `dir`.
    ///
    /// Answers are memoized under `dir` joined with the ASCII-folded
    /// component, so every spelling of one entry shares a slot.
    fn on_disk_case(&mut self, dir: &FileName, component: &str) -> Result<Option<String>> {
        let key = dir.join_name(&component.to_ascii_lowercase());
        if let Some(hit) = self.caches.case(&key) {
            return Ok(hit);
        }
        let text = dir.join_name(component).to_string();
        let on_disk = self
            .fs
            .canonical_case(&text)
            .map_err(|e| Error::system("canonical_case", &text, e))?;
        self.caches.insert_case(key, on_disk.clone());
        Ok(on_disk)
    }

    /// The target of `name` if it is a symlink.
    ///
    /// Relative targets are resolved against the directory holding the
    /// link; the result is not normalized. Answers for absolute paths are
    /// memoized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] if reading the link fails for a reason
    /// other than absence.
    pub fn resolve_symlink(&mut self, name: &FileName) -> Result<Option<FileName>> {
        let Some(parent) = name.parent() else {
            return Ok(None);
        };
        if name.is_absolute() {
            if let Some(hit) = self.caches.symlink(name) {
                return Ok(hit);
            }
        }
        let text = name.to_string();
        let target = self
            .fs
            .read_symlink_target(&text)
            .map_err(|e| Error::system("read_symlink_target", &text, e))?;
        let resolved = target.map(|target| {
            trace!("symlink {text} -> {target}");
            let parsed = self.parse_os(&target, name.encoding());
            if parsed.is_absolute() {
                parsed
            } else {
                parent.join(&parsed)
            }
        });
        if name.is_absolute() {
            self.caches.insert_symlink(name.clone(), resolved.clone());
        }
        Ok(resolved)
    }

    /// Follows symlinks until `path` no longer names one.
    fn resolve_chain(&mut self, path: &mut FileName) -> Result<bool> {
        let mut hops = 0;
        while let Some(target) = self.resolve_symlink(path)? {
            hops += 1;
            if hops > MAX_SYMLINK_DEPTH {
                return Err(Error::SymlinkLoop {
                    path: path.to_string(),
                    limit: MAX_SYMLINK_DEPTH,
                });
            }
            *path = target;
        }
        Ok(hops > 0)
    }

    /// Follows the symlink chain at `name` to a path that is not a symlink.
    ///
    /// Only the final component is examined at each step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SymlinkLoop`] after more than
    /// [`MAX_SYMLINK_DEPTH`] hops and [`Error::System`] if reading a link
    /// fails.
    pub fn resolve_all_symlinks(&mut self, name: &FileName) -> Result<FileName> {
        let mut path = name.clone();
        self.resolve_chain(&mut path)?;
        Ok(path)
    }

    fn resolve_long_or_short(&mut self, path: &mut FileName, short: bool) -> Result<bool> {
        let (Some(parent), Some(last)) = (path.parent(), path.final_name()) else {
            return Ok(false);
        };
        let replacement = match path.is_absolute().then(|| self.caches.long_or_short(path, short)) {
            Some(Some(hit)) => hit,
            _ => {
                let text = path.to_string();
                let operation = if short { "short_name" } else { "long_name" };
                let alias = self
                    .fs
                    .long_or_short_name(&text, short)
                    .map_err(|e| Error::system(operation, &text, e))?;
                let replacement = alias
                    .filter(|alias| !alias.is_empty() && *alias != last)
                    .map(|alias| parent.join_name(&alias));
                if path.is_absolute() {
                    self.caches
                        .insert_long_or_short(path.clone(), short, replacement.clone());
                }
                replacement
            }
        };
        match replacement {
            Some(replacement) => {
                *path = replacement;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// `name` with its final component replaced by its long name, if the
    /// file system knows one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] if the query fails.
    pub fn resolve_long_name(&mut self, name: &FileName) -> Result<FileName> {
        let mut path = name.clone();
        self.resolve_long_or_short(&mut path, false)?;
        Ok(path)
    }

    /// `name` with its final component replaced by its 8.3 short name, if
    /// the file system knows one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::System`] if the query fails.
    pub fn resolve_short_name(&mut self, name: &FileName) -> Result<FileName> {
        let mut path = name.clone();
        self.resolve_long_or_short(&mut path, true)?;
        Ok(path)
    }

    /// Forgets normalized results and on-disk case answers.
    pub fn clear_normalize_cache(&mut self) {
        debug!("clearing normalize cache");
        self.caches.clear_normalized();
    }

    /// Forgets symlink targets and long/short name answers.
    pub fn clear_symlink_cache(&mut self) {
        debug!("clearing symlink cache");
        self.caches.clear_symlinks();
    }

    /// Renders the normalized form of `name` as a `\\?\` long path.
    ///
    /// # Errors
    ///
    /// As [`normalize`](Self::normalize).
    pub fn long_path_string(&mut self, name: &FileName) -> Result<String> {
        Ok(self
            .normalize(name, NormalizeFlags::empty(), None)?
            .to_long_path_string())
    }
}
