//! Path normalization.
//!
//! Normalizing turns any handle into a canonical absolute one:
//!
//! - relative paths are completed against a base directory (by default the
//!   working directory first seen by the [`Normalizer`]);
//! - an absolute path without filesystem inherits the base's filesystem;
//! - `..` components are folded, after resolving symlinks on the path they
//!   climb out of;
//! - depending on [`NormalizeFlags`], names are lowercased, replaced by
//!   their on-disk case, symlinks are resolved and long/short names are
//!   substituted.
//!
//! Results are memoized per encoding and flag set. The caches are never
//! invalidated behind the caller's back; after changing the file system,
//! call [`Normalizer::clear_normalize_cache`] and
//! [`Normalizer::clear_symlink_cache`].

mod cache;
mod flags;
mod normalizer;
#[cfg(all(test, feature = "property-tests"))]
mod proptests;
mod relative;
#[cfg(test)]
mod tests;

pub use flags::NormalizeFlags;
pub use normalizer::{Normalizer, MAX_SYMLINK_DEPTH};
