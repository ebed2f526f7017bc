//! Platform validity checks for path handles.

use super::{FileName, Interpretation};
use crate::error::{Error, Result};

/// Longest total name length Windows accepts, in bytes, separators included.
pub const MAX_WINDOWS_PATH_LEN: usize = 256;

const RESERVED_CHARS: &[u8] = b"<>:\"/\\|?*";

/// Explains why `name` is not a valid Windows component, if it is not.
///
/// # Examples
///
/// ```
/// use pathtree::name::invalid_windows_component;
///
/// assert!(invalid_windows_component("console").is_none());
/// assert!(invalid_windows_component("AUX.exe").is_some());
/// assert!(invalid_windows_component("foo.").is_some());
/// ```
#[must_use]
pub fn invalid_windows_component(name: &str) -> Option<&'static str> {
    let bytes = name.as_bytes();
    if bytes.iter().any(|&b| b < 32) {
        return Some("control character in name");
    }
    if bytes.iter().any(|b| RESERVED_CHARS.contains(b)) {
        return Some("reserved character in name");
    }
    if is_reserved_device(bytes) {
        return Some("reserved device name");
    }
    if name.ends_with('.') && name != ".." {
        return Some("name ends with '.'");
    }
    None
}

/// `CON`, `PRN`, `AUX`, `NUL`, `COM1`-`COM9` and `LPT1`-`LPT9`, alone or
/// followed by an extension.
fn is_reserved_device(bytes: &[u8]) -> bool {
    let ends_at = |len: usize| bytes.len() == len || bytes.get(len) == Some(&b'.');
    let prefix = |word: &[u8]| bytes.len() >= 3 && bytes[..3].eq_ignore_ascii_case(word);

    if [b"CON", b"PRN", b"AUX", b"NUL"].iter().any(|w| prefix(&w[..])) && ends_at(3) {
        return true;
    }
    [b"COM", b"LPT"].iter().any(|w| prefix(&w[..]))
        && matches!(bytes.get(3), Some(b'1'..=b'9'))
        && ends_at(4)
}

impl FileName {
    /// Explains why this path is invalid under `interp`, if it is.
    ///
    /// Only Windows interpretations can reject a path.
    #[must_use]
    pub fn invalid_reason(&self, interp: Interpretation) -> Option<String> {
        if !interp.is_windows() {
            return None;
        }
        let names = self.names();
        for name in &names {
            if let Some(reason) = invalid_windows_component(name) {
                return Some(format!("{reason}: {name:?}"));
            }
        }
        let total: usize = names.iter().map(|n| n.len() + 1).sum();
        if total.saturating_sub(1) > MAX_WINDOWS_PATH_LEN {
            return Some(format!("path is longer than {MAX_WINDOWS_PATH_LEN} bytes"));
        }
        None
    }

    /// True when the path is acceptable under `interp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::{Interpretation, PathTree};
    ///
    /// let tree = PathTree::new();
    /// let name = tree.parse("dir/con", Interpretation::Portable);
    /// assert!(!name.is_valid_for(Interpretation::Windows));
    /// assert!(name.is_valid_for(Interpretation::Unix));
    /// ```
    #[must_use]
    pub fn is_valid_for(&self, interp: Interpretation) -> bool {
        self.invalid_reason(interp).is_none()
    }

    /// True when the path is acceptable to the host operating system.
    #[must_use]
    pub fn is_valid_for_host(&self) -> bool {
        self.is_valid_for(Interpretation::Host)
    }

    /// Checks the path against `interp`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path is invalid.
    pub fn validate_for(&self, interp: Interpretation) -> Result<()> {
        match self.invalid_reason(interp) {
            Some(reason) => Err(Error::InvalidPath {
                path: self.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Checks the path against the host operating system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path is invalid.
    pub fn validate_for_host(&self) -> Result<()> {
        self.validate_for(Interpretation::Host)
    }
}
