//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `parse`: Show components, filesystem and canonical form of paths
//! - `normalize`: Normalize paths against the working directory or a base
//! - `compare`: Compare two paths, with prefix and hash details
//! - `relative`: Express a path relative to a directory
//! - `validate`: Check paths against platform naming rules
//! - `stats`: Intern a list of paths and report tree statistics
//! - `completions`: Generate shell completion scripts

pub mod compare;
pub mod completions;
pub mod normalize;
pub mod parse;
pub mod relative;
pub mod stats;
pub mod validate;

pub use compare::CompareCommand;
pub use completions::CompletionsCommand;
pub use normalize::NormalizeCommand;
pub use parse::ParseCommand;
pub use relative::RelativeCommand;
pub use stats::StatsCommand;
pub use validate::ValidateCommand;
