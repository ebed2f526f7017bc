//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompareCommand, CompletionsCommand, NormalizeCommand, ParseCommand, RelativeCommand,
    StatsCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use pathtree::config::OutputFormat;
use pathtree::Interpretation;

/// Parse, normalize and compare file path names.
#[derive(Parser)]
#[command(name = "pathtree")]
#[command(version, about = "Parse, normalize and compare file path names", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// How input paths are interpreted (unix, portable, windows, host, magic)
    #[arg(
        long,
        value_name = "STYLE",
        global = true,
        env = "PATHTREE_INTERPRETATION",
        value_parser = Interpretation::parse
    )]
    pub interp: Option<Interpretation>,

    /// Output format
    #[arg(
        long,
        value_enum,
        global = true,
        env = "PATHTREE_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: Option<OutputFormat>,

    /// Tag paths as UTF-8 instead of the system encoding
    #[arg(long, global = true)]
    pub utf8: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Show how paths parse
    Parse(ParseCommand),

    /// Normalize paths to canonical absolute form
    Normalize(NormalizeCommand),

    /// Compare two paths
    Compare(CompareCommand),

    /// Express a path relative to a directory
    Relative(RelativeCommand),

    /// Check paths for platform validity
    Validate(ValidateCommand),

    /// Intern a list of paths and report tree statistics
    Stats(StatsCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
