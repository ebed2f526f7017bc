//! The operating-system boundary.
//!
//! Everything the normalizer needs from the file system goes through the
//! [`FileSystem`] trait: metadata, symlink targets, directory listings, the
//! on-disk case of a name, long/short name aliases and working directories.
//! Paths cross the boundary as portable strings (`/` separators, drive or
//! UNC prefix kept).
//!
//! Absence is never an error here: a missing file, a missing directory in
//! the middle of a path, or a file that is not a symlink all come back as
//! `Ok(None)`. Any other failure is returned as the raw [`io::Error`] and
//! wrapped with the operation name by the caller.

mod host;
mod memory;

use std::io;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::name::Interpretation;

pub use host::HostFileSystem;
pub use memory::MemoryFileSystem;

/// Kind of file reported by [`FileSystem::stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileKind {
    /// A directory.
    Directory,
    /// A regular file.
    Regular,
    /// A symbolic link (only from [`FileSystem::link_stat`]).
    Symlink,
    /// Anything else: devices, sockets, pipes.
    Other,
}

/// Metadata about one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// What the file is.
    pub kind: FileKind,
    /// Size in bytes.
    pub size: u64,
    /// Last access time, when the platform records it.
    pub last_access: Option<DateTime<Utc>>,
    /// Last modification time, when the platform records it.
    pub last_modified: Option<DateTime<Utc>>,
    /// Preferred I/O block size.
    pub io_block_size: u64,
}

impl FileStats {
    /// Builds stats from std metadata.
    #[must_use]
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        let file_type = metadata.file_type();
        let kind = if file_type.is_symlink() {
            FileKind::Symlink
        } else if file_type.is_dir() {
            FileKind::Directory
        } else if file_type.is_file() {
            FileKind::Regular
        } else {
            FileKind::Other
        };
        Self {
            kind,
            size: metadata.len(),
            last_access: metadata.accessed().ok().map(DateTime::<Utc>::from),
            last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            io_block_size: block_size(metadata),
        }
    }

    /// True for directories.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    /// True for regular files.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::Regular
    }
}

#[cfg(unix)]
fn block_size(metadata: &std::fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.blksize()
}

#[cfg(not(unix))]
fn block_size(_metadata: &std::fs::Metadata) -> u64 {
    4096
}

/// Narrow interface to the file system used by the normalizer.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Metadata of `path`, following symlinks.
    ///
    /// # Errors
    ///
    /// Returns an error for failures other than absence.
    fn stat(&self, path: &str) -> io::Result<Option<FileStats>>;

    /// Metadata of `path` itself, without following a final symlink.
    ///
    /// # Errors
    ///
    /// Returns an error for failures other than absence.
    fn link_stat(&self, path: &str) -> io::Result<Option<FileStats>>;

    /// Target text of the symlink at `path`, `None` if it is not one.
    ///
    /// # Errors
    ///
    /// Returns an error for failures other than absence.
    fn read_symlink_target(&self, path: &str) -> io::Result<Option<String>>;

    /// Names of the entries of directory `path`, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn list_directory(&self, path: &str) -> io::Result<Vec<String>>;

    /// Names of the entries of directory `path`, sorted bytewise.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn list_directory_ordered(&self, path: &str) -> io::Result<Vec<String>> {
        let mut names = self.list_directory(path)?;
        names.sort_unstable();
        Ok(names)
    }

    /// The final component of `path` as spelled on disk.
    ///
    /// Meaningful on case-insensitive file systems; `None` if the file does
    /// not exist or the query is unsupported.
    ///
    /// # Errors
    ///
    /// Returns an error for failures other than absence.
    fn canonical_case(&self, path: &str) -> io::Result<Option<String>>;

    /// The long (or, with `short`, the 8.3 short) final component of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error for failures other than absence.
    fn long_or_short_name(&self, path: &str, short: bool) -> io::Result<Option<String>>;

    /// The process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is unavailable.
    fn current_dir(&self) -> io::Result<String>;

    /// Completes a drive-relative path such as `D:src` against that drive's
    /// own working directory; `None` where drives have none.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn drive_full_path(&self, path: &str) -> io::Result<Option<String>>;

    /// How path strings returned by this file system are parsed.
    fn interpretation(&self) -> Interpretation {
        Interpretation::Host
    }
}

impl<T: FileSystem + ?Sized> FileSystem for Rc<T> {
    fn stat(&self, path: &str) -> io::Result<Option<FileStats>> {
        (**self).stat(path)
    }

    fn link_stat(&self, path: &str) -> io::Result<Option<FileStats>> {
        (**self).link_stat(path)
    }

    fn read_symlink_target(&self, path: &str) -> io::Result<Option<String>> {
        (**self).read_symlink_target(path)
    }

    fn list_directory(&self, path: &str) -> io::Result<Vec<String>> {
        (**self).list_directory(path)
    }

    fn list_directory_ordered(&self, path: &str) -> io::Result<Vec<String>> {
        (**self).list_directory_ordered(path)
    }

    fn canonical_case(&self, path: &str) -> io::Result<Option<String>> {
        (**self).canonical_case(path)
    }

    fn long_or_short_name(&self, path: &str, short: bool) -> io::Result<Option<String>> {
        (**self).long_or_short_name(path, short)
    }

    fn current_dir(&self) -> io::Result<String> {
        (**self).current_dir()
    }

    fn drive_full_path(&self, path: &str) -> io::Result<Option<String>> {
        (**self).drive_full_path(path)
    }

    fn interpretation(&self) -> Interpretation {
        (**self).interpretation()
    }
}

/// Maps "does not exist" outcomes to `Ok(None)`.
pub(crate) fn absent_on_missing<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if is_absence(&e) => Ok(None),
        Err(e) => Err(e),
    }
}

/// True for errors meaning the path (or one of its directories) is missing.
pub(crate) fn is_absence(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
