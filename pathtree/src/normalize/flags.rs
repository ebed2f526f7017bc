use std::fmt;

bitflags::bitflags! {
    /// Options for normalization.
    ///
    /// Each distinct combination gets its own memoization table, so callers
    /// should settle on a small number of flag sets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NormalizeFlags: u8 {
        /// Replace each component with its long (non 8.3) name.
        const LONG_NAME = 1;
        /// Replace each component with its 8.3 short name.
        const SHORT_NAME = 1 << 1;
        /// Lowercase the filesystem and every component (ASCII).
        const LOWERCASE_ALWAYS = 1 << 2;
        /// Replace symlinks by their targets.
        const RESOLVE_SYMLINKS = 1 << 3;
        /// Use the on-disk case of each component; uppercase the filesystem.
        const NORMALIZE_CASE = 1 << 4;
        /// Keep `..` components instead of folding them.
        const PRESERVE_RELATIVE = 1 << 5;
    }
}

impl NormalizeFlags {
    /// [`LOWERCASE_ALWAYS`](Self::LOWERCASE_ALWAYS) on Windows hosts, empty
    /// elsewhere.
    pub const LOWERCASE_IF_WINDOWS: Self = if cfg!(windows) {
        Self::LOWERCASE_ALWAYS
    } else {
        Self::empty()
    };

    /// Applies the filesystem re-casing these flags ask for.
    pub(crate) fn recase_filesystem(self, filesystem: &str) -> String {
        if self.contains(Self::LOWERCASE_ALWAYS) {
            filesystem.to_ascii_lowercase()
        } else if self.contains(Self::NORMALIZE_CASE) {
            filesystem.to_ascii_uppercase()
        } else {
            filesystem.to_string()
        }
    }

    /// True when [`recase_filesystem`](Self::recase_filesystem) may change
    /// its input.
    pub(crate) const fn recases_filesystem(self) -> bool {
        self.intersects(Self::LOWERCASE_ALWAYS.union(Self::NORMALIZE_CASE))
    }
}

impl fmt::Display for NormalizeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        bitflags::parser::to_writer(self, f)
    }
}
