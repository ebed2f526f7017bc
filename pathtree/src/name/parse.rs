//! The path grammar, as a lazy segment iterator.
//!
//! A path string is split into a filesystem specifier, an absolute marker
//! and a sequence of component names. Parsing never fails: any string has
//! exactly one reading under a given [`Interpretation`].

use std::borrow::Cow;

use super::Interpretation;

/// Reserved filesystem marker for fully-qualified symbolic names.
pub const FQN_MARKER: &str = "#FQN:";

/// One item produced by [`Segments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Always the first segment.
    Root {
        /// Drive letter, UNC host (`\\host`), `#FQN:`, or empty.
        filesystem: Cow<'a, str>,
        /// Whether one or more separators followed the filesystem.
        absolute: bool,
    },
    /// A component name; never empty and never `.`.
    Name(&'a str),
}

/// Iterator over the segments of a path string.
///
/// # Examples
///
/// ```
/// use pathtree::Interpretation;
/// use pathtree::name::{Segment, Segments};
///
/// let segments: Vec<_> = Segments::new(r"C:\dir\file. ", Interpretation::Windows).collect();
/// assert_eq!(
///     segments,
///     vec![
///         Segment::Root { filesystem: "C:".into(), absolute: true },
///         Segment::Name("dir"),
///         Segment::Name("file"),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    root: Option<(Cow<'a, str>, bool)>,
    components: Components<'a>,
}

impl<'a> Segments<'a> {
    /// Starts parsing `path` under `interp`.
    #[must_use]
    pub fn new(path: &'a str, interp: Interpretation) -> Self {
        let interp = interp.resolve();
        let (filesystem, rest) = split_filesystem(path, interp);
        let trimmed = skip_separators(rest, interp);
        let absolute = trimmed.len() != rest.len();
        Self {
            root: Some((filesystem, absolute)),
            components: Components {
                rest: trimmed,
                interp,
            },
        }
    }

    /// Splits into the root parts and the remaining component iterator.
    ///
    /// If the root segment was already consumed, the filesystem is empty
    /// and the path is reported as relative.
    #[must_use]
    pub fn into_parts(self) -> (Cow<'a, str>, bool, Components<'a>) {
        let (filesystem, absolute) = self.root.unwrap_or((Cow::Borrowed(""), false));
        (filesystem, absolute, self.components)
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((filesystem, absolute)) = self.root.take() {
            return Some(Segment::Root {
                filesystem,
                absolute,
            });
        }
        self.components.next().map(Segment::Name)
    }
}

/// Iterator over the component names that follow a root.
#[derive(Debug, Clone)]
pub struct Components<'a> {
    rest: &'a str,
    interp: Interpretation,
}

impl<'a> Iterator for Components<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let interp = self.interp;
        let mut s = self.rest;

        // Skip "." components, which name the directory they are in.
        while let Some(stripped) = s.strip_prefix('.') {
            match stripped.as_bytes().first() {
                None => s = stripped,
                Some(&c) if interp.is_separator(c) => s = skip_separators(stripped, interp),
                Some(_) => break,
            }
        }

        if s.is_empty() {
            self.rest = s;
            return None;
        }

        let end = s
            .bytes()
            .position(|c| interp.is_separator(c))
            .unwrap_or(s.len());
        let mut name = &s[..end];
        if interp.is_windows() {
            let trimmed = name.trim_end_matches(['.', ' ']);
            if !trimmed.is_empty() {
                name = trimmed;
            }
        }
        self.rest = skip_separators(&s[end..], interp);
        Some(name)
    }
}

fn skip_separators(s: &str, interp: Interpretation) -> &str {
    let skip = s
        .bytes()
        .position(|c| !interp.is_separator(c))
        .unwrap_or(s.len());
    &s[skip..]
}

const fn is_windows_separator(byte: u8) -> bool {
    byte == b'/' || byte == b'\\'
}

/// Splits a leading filesystem specifier off `path`.
///
/// Only Portable and Windows interpretations recognize one. UNC hosts are
/// returned with backslashes (`//host` becomes `\\host`), and the `\\?\`
/// and `\\?\UNC\` long-path prefixes are unwrapped.
fn split_filesystem(path: &str, interp: Interpretation) -> (Cow<'_, str>, &str) {
    if !interp.parses_filesystem() {
        return (Cow::Borrowed(""), path);
    }
    if let Some(rest) = path.strip_prefix(FQN_MARKER) {
        return (Cow::Borrowed(FQN_MARKER), rest);
    }

    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return (Cow::Borrowed(&path[..2]), &path[2..]);
    }

    if bytes.len() >= 2 && is_windows_separator(bytes[0]) && bytes[1] == bytes[0] {
        if bytes.len() >= 4 && bytes[2] == b'?' && is_windows_separator(bytes[3]) {
            let after = &path[4..];
            let unc = after.as_bytes();
            if unc.len() >= 4 && unc[..3].eq_ignore_ascii_case(b"UNC") && is_windows_separator(unc[3])
            {
                let host = &after[4..];
                let end = host
                    .bytes()
                    .position(is_windows_separator)
                    .unwrap_or(host.len());
                return (Cow::Owned(format!("\\\\{}", &host[..end])), &host[end..]);
            }
            return split_filesystem(after, interp);
        }

        let host = &path[2..];
        let end = host
            .bytes()
            .position(is_windows_separator)
            .unwrap_or(host.len());
        let rest = &host[end..];
        if bytes[0] == b'\\' {
            return (Cow::Borrowed(&path[..end + 2]), rest);
        }
        return (Cow::Owned(format!("\\\\{}", &host[..end])), rest);
    }

    (Cow::Borrowed(""), path)
}
