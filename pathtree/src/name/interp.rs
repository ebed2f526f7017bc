//! Path interpretations and encoding tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a raw string is split into a filesystem, an absolute marker and
/// components, and how a path is rendered back to text.
///
/// # Examples
///
/// ```
/// use pathtree::Interpretation;
///
/// assert_eq!(Interpretation::Magic.resolve(), Interpretation::Windows);
/// assert!(Interpretation::Windows.is_separator(b'\\'));
/// assert!(!Interpretation::Portable.is_separator(b'\\'));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Interpretation {
    /// `/` is the only separator; no filesystem specifiers.
    Unix,
    /// `/` separator plus drive letters and UNC hosts. The canonical
    /// serialized form.
    Portable,
    /// `/` and `\` separators, drive letters, UNC hosts, `\\?\` prefixes and
    /// trailing dot/space trimming.
    Windows,
    /// Windows on Windows hosts, Unix elsewhere.
    Host,
    /// Best guess for text of unknown origin; currently Windows.
    #[default]
    Magic,
}

impl Interpretation {
    /// Maps `Host` and `Magic` onto a concrete interpretation.
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Host => {
                if cfg!(windows) {
                    Self::Windows
                } else {
                    Self::Unix
                }
            }
            Self::Magic => Self::Windows,
            other => other,
        }
    }

    /// True when this interpretation follows Windows rules.
    #[must_use]
    pub const fn is_windows(self) -> bool {
        matches!(self.resolve(), Self::Windows)
    }

    /// True when a leading drive letter or UNC host is recognized.
    #[must_use]
    pub const fn parses_filesystem(self) -> bool {
        matches!(self.resolve(), Self::Portable | Self::Windows)
    }

    /// True when `byte` separates components.
    #[must_use]
    pub const fn is_separator(self, byte: u8) -> bool {
        byte == b'/' || (byte == b'\\' && self.is_windows())
    }

    /// The separator used when rendering in this style.
    #[must_use]
    pub const fn separator(self) -> char {
        if self.is_windows() {
            '\\'
        } else {
            '/'
        }
    }

    /// Parses an interpretation name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "unix" => Ok(Self::Unix),
            "portable" => Ok(Self::Portable),
            "windows" => Ok(Self::Windows),
            "host" => Ok(Self::Host),
            "magic" => Ok(Self::Magic),
            _ => Err(format!("invalid interpretation: {s}")),
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Portable => write!(f, "portable"),
            Self::Windows => write!(f, "windows"),
            Self::Host => write!(f, "host"),
            Self::Magic => write!(f, "magic"),
        }
    }
}

/// Encoding tag carried by every path handle.
///
/// Handles with different tags never compare or combine; the tag records
/// whether the text came from the system's default encoding or from UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// The operating system's native encoding.
    #[default]
    SystemDefault,
    /// UTF-8.
    Utf8,
}

impl Encoding {
    /// Both encodings, in cache slot order.
    pub const ALL: [Self; 2] = [Self::SystemDefault, Self::Utf8];

    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::SystemDefault => 0,
            Self::Utf8 => 1,
        }
    }

    /// Parses an encoding name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "system-default" | "system" => Ok(Self::SystemDefault),
            "utf8" | "utf-8" => Ok(Self::Utf8),
            _ => Err(format!("invalid encoding: {s}")),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SystemDefault => write!(f, "system-default"),
            Self::Utf8 => write!(f, "utf8"),
        }
    }
}
