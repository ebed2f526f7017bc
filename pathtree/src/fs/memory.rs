//! An in-memory file system for tests and offline analysis.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;

use super::{FileKind, FileStats, FileSystem};
use crate::name::Interpretation;
use crate::normalize::MAX_SYMLINK_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Directory,
    File { size: u64 },
    Symlink { target: String },
}

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<String, Entry>,
    /// Long path → short final component.
    short_names: BTreeMap<String, String>,
    /// Drive letter (uppercase) → that drive's working directory.
    drive_dirs: BTreeMap<char, String>,
    current_dir: String,
    case_insensitive: bool,
}

/// [`FileSystem`] whose contents are declared up front.
///
/// Paths are portable strings such as `/src/main.c` or `C:/Base/a`. Adding
/// an entry adds its missing parent directories. Lookups are exact unless
/// [`set_case_insensitive`](Self::set_case_insensitive) is enabled; the
/// canonical-case query always ignores ASCII case.
///
/// Mutation goes through `&self`, so a file system shared through an `Rc`
/// can be changed after a context starts using it.
///
/// # Examples
///
/// ```
/// use pathtree::fs::{FileSystem, MemoryFileSystem};
///
/// let fs = MemoryFileSystem::new();
/// fs.add_file("/src/lib.rs", 120);
/// fs.add_symlink("/latest", "src");
/// assert!(fs.stat("/src").unwrap().unwrap().is_dir());
/// assert_eq!(fs.read_symlink_target("/latest").unwrap().as_deref(), Some("src"));
/// ```
#[derive(Debug)]
pub struct MemoryFileSystem {
    inner: RefCell<Inner>,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_key(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() || trimmed.ends_with(':') {
        // Keep "/" and "C:/" as they are.
        return format!("{trimmed}/");
    }
    trimmed.to_string()
}

fn parent_key(key: &str) -> Option<String> {
    let pos = key.trim_end_matches('/').rfind('/')?;
    Some(trim_key(&key[..=pos]))
}

/// Splits a path into its root key (`/`, `C:/` or `\\host`) and names.
fn split_key(path: &str) -> (String, Vec<&str>) {
    let bytes = path.as_bytes();
    let (root, rest) = if path.starts_with("\\\\") {
        let end = path[2..].find('/').map_or(path.len(), |pos| pos + 2);
        (path[..end].to_string(), &path[end..])
    } else if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        (trim_key(&path[..2]), &path[2..])
    } else {
        ("/".to_string(), path)
    };
    let names = rest
        .split('/')
        .filter(|name| !name.is_empty() && *name != ".")
        .collect();
    (root, names)
}

fn join_key(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Joins a relative symlink target onto the directory holding the link,
/// folding `..` lexically.
fn resolve_target(link: &str, target: &str) -> String {
    if target.starts_with('/') || target.as_bytes().get(1) == Some(&b':') {
        return trim_key(target);
    }
    let mut base: Vec<&str> = match link.rfind('/') {
        Some(pos) => link[..pos].split('/').collect(),
        None => Vec::new(),
    };
    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if base.len() > 1 {
                    base.pop();
                }
            }
            other => base.push(other),
        }
    }
    trim_key(&base.join("/"))
}

impl MemoryFileSystem {
    /// Creates an empty file system with `/` as working directory.
    #[must_use]
    pub fn new() -> Self {
        let fs = Self {
            inner: RefCell::new(Inner {
                current_dir: "/".to_string(),
                ..Inner::default()
            }),
        };
        fs.add_dir("/");
        fs
    }

    fn insert(&self, path: &str, entry: Entry) {
        let key = trim_key(path);
        let mut parents = Vec::new();
        let mut cursor = parent_key(&key);
        while let Some(parent) = cursor {
            cursor = parent_key(&parent);
            parents.push(parent);
        }
        let mut inner = self.inner.borrow_mut();
        for parent in parents {
            inner.entries.entry(parent).or_insert(Entry::Directory);
        }
        inner.entries.insert(key, entry);
    }

    /// Adds a directory and its parents.
    pub fn add_dir(&self, path: &str) {
        self.insert(path, Entry::Directory);
    }

    /// Adds a regular file of `size` bytes.
    pub fn add_file(&self, path: &str, size: u64) {
        self.insert(path, Entry::File { size });
    }

    /// Adds a symlink whose target text is `target`.
    pub fn add_symlink(&self, path: &str, target: &str) {
        self.insert(
            path,
            Entry::Symlink {
                target: target.to_string(),
            },
        );
    }

    /// Removes an entry (not its children).
    pub fn remove(&self, path: &str) {
        self.inner.borrow_mut().entries.remove(&trim_key(path));
    }

    /// Declares `short` as the 8.3 alias of the final component of `path`.
    pub fn add_short_name(&self, path: &str, short: &str) {
        self.inner
            .borrow_mut()
            .short_names
            .insert(trim_key(path), short.to_string());
    }

    /// Sets the process working directory.
    pub fn set_current_dir(&self, path: &str) {
        self.inner.borrow_mut().current_dir = trim_key(path);
    }

    /// Sets the working directory of `drive` for drive-relative paths.
    pub fn set_drive_dir(&self, drive: char, path: &str) {
        self.inner
            .borrow_mut()
            .drive_dirs
            .insert(drive.to_ascii_uppercase(), trim_key(path));
    }

    /// Makes every lookup ignore ASCII case.
    pub fn set_case_insensitive(&self, enabled: bool) {
        self.inner.borrow_mut().case_insensitive = enabled;
    }

    /// Finds the stored key for `path`, honoring case sensitivity.
    fn find_key(&self, path: &str, ignore_case: bool) -> Option<(String, Entry)> {
        let key = trim_key(path);
        let inner = self.inner.borrow();
        if let Some(entry) = inner.entries.get(&key) {
            return Some((key, entry.clone()));
        }
        if ignore_case || inner.case_insensitive {
            return inner
                .entries
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(&key))
                .map(|(k, e)| (k.clone(), e.clone()));
        }
        None
    }

    /// Looks `path` up one component at a time, following symlinks met on
    /// the way. The final component is followed only when `follow_final` is
    /// set. Returns the stored key reached and its entry.
    fn walk(
        &self,
        path: &str,
        follow_final: bool,
        ignore_case: bool,
    ) -> io::Result<Option<(String, Entry)>> {
        let (root, names) = split_key(path);
        let Some((mut key, mut entry)) = self.find_key(&root, ignore_case) else {
            return Ok(None);
        };
        // Names still to visit, next one last.
        let mut pending: Vec<String> = names.into_iter().rev().map(str::to_string).collect();
        let mut hops = 0;

        while let Some(name) = pending.pop() {
            if name == ".." {
                if let Some(parent) = parent_key(&key) {
                    key = parent;
                    entry = Entry::Directory;
                }
                continue;
            }
            if entry != Entry::Directory {
                return Ok(None);
            }
            let Some((found, found_entry)) = self.find_key(&join_key(&key, &name), ignore_case)
            else {
                return Ok(None);
            };
            match found_entry {
                Entry::Symlink { target } if follow_final || !pending.is_empty() => {
                    hops += 1;
                    if hops > MAX_SYMLINK_DEPTH {
                        return Err(io::Error::new(
                            io::ErrorKind::Other,
                            format!("too many levels of symbolic links: {path}"),
                        ));
                    }
                    let resolved = resolve_target(&found, &target);
                    let (target_root, target_names) = split_key(&resolved);
                    pending.extend(target_names.into_iter().rev().map(str::to_string));
                    let Some((root_key, root_entry)) = self.find_key(&target_root, ignore_case)
                    else {
                        return Ok(None);
                    };
                    key = root_key;
                    entry = root_entry;
                }
                other => {
                    key = found;
                    entry = other;
                }
            }
        }
        Ok(Some((key, entry)))
    }

    fn stats_for(entry: &Entry) -> FileStats {
        let (kind, size) = match entry {
            Entry::Directory => (FileKind::Directory, 0),
            Entry::File { size } => (FileKind::Regular, *size),
            Entry::Symlink { target } => (FileKind::Symlink, target.len() as u64),
        };
        FileStats {
            kind,
            size,
            last_access: None,
            last_modified: None,
            io_block_size: 4096,
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn stat(&self, path: &str) -> io::Result<Option<FileStats>> {
        Ok(self
            .walk(path, true, false)?
            .map(|(_, entry)| Self::stats_for(&entry)))
    }

    fn link_stat(&self, path: &str) -> io::Result<Option<FileStats>> {
        Ok(self
            .walk(path, false, false)?
            .map(|(_, entry)| Self::stats_for(&entry)))
    }

    fn read_symlink_target(&self, path: &str) -> io::Result<Option<String>> {
        match self.walk(path, false, false)? {
            Some((_, Entry::Symlink { target })) => Ok(Some(target)),
            _ => Ok(None),
        }
    }

    fn list_directory(&self, path: &str) -> io::Result<Vec<String>> {
        let Some((key, entry)) = self.walk(path, true, false)? else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {path}"),
            ));
        };
        if entry != Entry::Directory {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("not a directory: {path}"),
            ));
        }
        let prefix = if key.ends_with('/') {
            key.clone()
        } else {
            format!("{key}/")
        };
        let inner = self.inner.borrow();
        Ok(inner
            .entries
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
            .map(str::to_string)
            .collect())
    }

    fn canonical_case(&self, path: &str) -> io::Result<Option<String>> {
        Ok(self.walk(path, false, true)?.and_then(|(key, _)| {
            key.trim_end_matches('/')
                .rsplit('/')
                .next()
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        }))
    }

    fn long_or_short_name(&self, path: &str, short: bool) -> io::Result<Option<String>> {
        let key = trim_key(path);
        let inner = self.inner.borrow();
        if short {
            return Ok(inner.short_names.get(&key).cloned());
        }
        let Some(parent) = parent_key(&key) else {
            return Ok(None);
        };
        let final_name = key.rsplit('/').next().unwrap_or_default();
        Ok(inner
            .short_names
            .iter()
            .find(|(long, alias)| {
                alias.eq_ignore_ascii_case(final_name)
                    && parent_key(long).as_deref() == Some(parent.as_str())
            })
            .and_then(|(long, _)| long.rsplit('/').next().map(str::to_string)))
    }

    fn current_dir(&self) -> io::Result<String> {
        Ok(self.inner.borrow().current_dir.clone())
    }

    fn drive_full_path(&self, path: &str) -> io::Result<Option<String>> {
        let bytes = path.as_bytes();
        if bytes.len() < 2 || bytes[1] != b':' || !bytes[0].is_ascii_alphabetic() {
            return Ok(None);
        }
        let drive = char::from(bytes[0].to_ascii_uppercase());
        let inner = self.inner.borrow();
        Ok(inner.drive_dirs.get(&drive).map(|dir| {
            let rest = &path[2..];
            if rest.is_empty() {
                dir.clone()
            } else {
                format!("{}/{rest}", dir.trim_end_matches('/'))
            }
        }))
    }

    fn interpretation(&self) -> Interpretation {
        Interpretation::Portable
    }
}
