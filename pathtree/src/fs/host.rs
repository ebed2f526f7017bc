//! The real file system, through `std::fs`.

use std::fs;
use std::io;
use std::path::Path;

use super::{absent_on_missing, FileStats, FileSystem};

/// [`FileSystem`] backed by the host operating system.
///
/// Case queries list the parent directory and pick the entry that matches
/// ignoring ASCII case; they are enabled by default on Windows only.
/// Long/short name aliases have no portable std API and are reported as
/// absent.
#[derive(Debug, Clone, Copy)]
pub struct HostFileSystem {
    case_queries: bool,
}

impl Default for HostFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl HostFileSystem {
    /// Creates a host file system with platform defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            case_queries: cfg!(windows),
        }
    }

    /// Enables or disables on-disk case queries.
    #[must_use]
    pub const fn with_case_queries(mut self, enabled: bool) -> Self {
        self.case_queries = enabled;
        self
    }
}

impl FileSystem for HostFileSystem {
    fn stat(&self, path: &str) -> io::Result<Option<FileStats>> {
        Ok(absent_on_missing(fs::metadata(path))?.map(|m| FileStats::from_metadata(&m)))
    }

    fn link_stat(&self, path: &str) -> io::Result<Option<FileStats>> {
        Ok(absent_on_missing(fs::symlink_metadata(path))?.map(|m| FileStats::from_metadata(&m)))
    }

    fn read_symlink_target(&self, path: &str) -> io::Result<Option<String>> {
        match fs::read_link(path) {
            Ok(target) => Ok(Some(target.to_string_lossy().into_owned())),
            // EINVAL: the file exists but is not a symlink.
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(None),
            Err(e) => absent_on_missing(Err(e)),
        }
    }

    fn list_directory(&self, path: &str) -> io::Result<Vec<String>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect()
    }

    fn canonical_case(&self, path: &str) -> io::Result<Option<String>> {
        if !self.case_queries {
            return Ok(None);
        }
        let path = Path::new(path);
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return Ok(None);
        };
        let name = name.to_string_lossy();
        let Some(entries) = absent_on_missing(fs::read_dir(parent))? else {
            return Ok(None);
        };
        // An exact match wins over a case-folded one on case-sensitive volumes.
        let mut folded = None;
        for entry in entries {
            let entry_name = entry?.file_name().to_string_lossy().into_owned();
            if entry_name == name {
                return Ok(Some(entry_name));
            }
            if folded.is_none() && entry_name.eq_ignore_ascii_case(&name) {
                folded = Some(entry_name);
            }
        }
        Ok(folded)
    }

    fn long_or_short_name(&self, _path: &str, _short: bool) -> io::Result<Option<String>> {
        Ok(None)
    }

    fn current_dir(&self) -> io::Result<String> {
        Ok(std::env::current_dir()?.to_string_lossy().into_owned())
    }

    fn drive_full_path(&self, path: &str) -> io::Result<Option<String>> {
        if cfg!(windows) {
            Ok(Some(std::path::absolute(path)?.to_string_lossy().into_owned()))
        } else {
            Ok(None)
        }
    }
}
