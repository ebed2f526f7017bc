//! Error types for the pathtree library.
//!
//! Absence (a file that does not exist, a path that is not a symlink) is
//! never an error in this crate; it is reported through `Option` or `bool`.
//! The variants here cover platform-invalid names, symlink loops, failed
//! operating-system calls and the configuration layer.
//!
//! Structural violations of the interning tree (duplicate children, mixed
//! encodings, depth overflow) are programming errors and panic instead.

use thiserror::Error;

/// Result type alias for operations that may fail with a pathtree error.
///
/// # Examples
///
/// ```
/// use pathtree::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathtree library.
#[derive(Debug, Error)]
pub enum Error {
    /// A file name is not valid on the target platform.
    #[error("Invalid file name: {path}: {reason}")]
    InvalidPath {
        /// The offending path, in portable form.
        path: String,
        /// The reason the name is invalid.
        reason: String,
    },

    /// Symlink resolution followed too many indirections.
    #[error("Trying to resolve {path}: too many levels of symlinks (limit {limit})")]
    SymlinkLoop {
        /// The path whose resolution was abandoned.
        path: String,
        /// The indirection limit that was exceeded.
        limit: usize,
    },

    /// An operating-system call failed for a reason other than absence.
    #[error("{operation} failed for {path}: {source}")]
    System {
        /// Name of the failed operation (`stat`, `readlink`, ...).
        operation: &'static str,
        /// The path the operation was applied to.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred outside of a path query.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The interning tree failed its self-check.
    #[error("path tree corruption detected: {details}")]
    TreeCorruption {
        /// Details about the corruption.
        details: String,
    },
}

impl Error {
    /// Wraps an I/O error from the named operation on `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::Error;
    ///
    /// let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
    /// let err = Error::system("stat", "/root/secret", io);
    /// assert!(err.to_string().starts_with("stat failed for /root/secret"));
    /// ```
    #[must_use]
    pub fn system(operation: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        Self::System {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::Error;
    ///
    /// let io = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
    /// assert!(Error::system("readlink", "/x", io).is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::System { source, .. } | Self::Io(source) => {
                source.kind() == std::io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }

    /// Check if error reports a platform-invalid file name.
    #[must_use]
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_invalid_path_error() {
        let err = Error::InvalidPath {
            path: "C:/dir/con".to_string(),
            reason: "reserved device name".to_string(),
        };
        let display = format!("{err}");
        assert!(display.starts_with("Invalid file name: C:/dir/con"));
        assert!(display.contains("reserved device name"));
        assert!(err.is_invalid_path());
    }

    #[test]
    fn test_symlink_loop_error() {
        let err = Error::SymlinkLoop {
            path: "/a/b".to_string(),
            limit: 32,
        };
        let display = format!("{err}");
        assert!(display.contains("Trying to resolve /a/b"));
        assert!(display.contains("too many levels of symlinks"));
        assert!(display.contains("32"));
    }

    #[test]
    fn test_system_error_carries_operation_and_path() {
        let err = Error::system("stat", "/tmp/x", io::Error::other("disk on fire"));
        let display = format!("{err}");
        assert!(display.contains("stat failed for /tmp/x"));
        assert!(display.contains("disk on fire"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "normalize".to_string(),
            message: "long_name and short_name are mutually exclusive".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("normalize"));
        assert!(display.contains("mutually exclusive"));
    }

    #[test]
    fn test_tree_corruption_error() {
        let err = Error::TreeCorruption {
            details: "node 7 unreachable".to_string(),
        };
        assert!(format!("{err}").contains("path tree corruption detected"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_permission_denied());
    }

    #[test]
    fn test_permission_denied() {
        let err = Error::system(
            "opendir",
            "/root",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(err.is_permission_denied());
        assert!(!err.is_invalid_path());
    }
}
