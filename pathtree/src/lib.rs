#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathtree
//!
//! Interned, memory-shared file path names.
//!
//! Every path parsed through a [`PathTree`] is stored as a chain of shared
//! nodes, so common prefixes exist once no matter how many paths use them.
//! Handles ([`FileName`]) are cheap to clone, compare structurally and
//! hash without rendering strings.
//!
//! ## Core Types
//!
//! - [`PathTree`] and [`FileName`]: the interning tree and its handles
//! - [`Interpretation`] and [`Encoding`]: how text is split and tagged
//! - [`CompareFlags`], [`FileComparison`] and [`FlaggedName`]: ordering and hashing
//! - [`Normalizer`] and [`NormalizeFlags`]: canonical absolute paths
//! - [`PathContext`]: a tree, a file system and caches in one place
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pathtree::{CompareFlags, FileComparison, Interpretation, PathTree};
//!
//! let tree = PathTree::new();
//! let dir = tree.parse(r"C:\Users\Me", Interpretation::Windows);
//! let file = tree.parse("c:/users/me/notes.txt", Interpretation::Portable);
//!
//! assert_eq!(dir.to_string(), "C:/Users/Me");
//! assert_eq!(
//!     dir.compare(&file, CompareFlags::CASE_INSENSITIVE),
//!     FileComparison::IsParentOf
//! );
//! ```

pub mod compare;
pub mod config;
mod context;
pub mod error;
pub mod fs;
pub mod logging;
pub mod name;
pub mod normalize;
pub mod output;
pub mod tree;

// Re-export key types at crate root for convenience
pub use compare::{CompareFlags, FileComparison, FlaggedName, PathRelationship};
pub use config::{Config, ConfigBuilder};
pub use context::PathContext;
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use name::{Encoding, FileName, Interpretation};
pub use normalize::{NormalizeFlags, Normalizer};
pub use tree::{PathTree, TreeStats};
