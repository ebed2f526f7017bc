//! Utility functions for CLI operations.
//!
//! This module provides the pieces every command shares: the global
//! options, configuration loading, context construction and report output.

use crate::error::CliError;
use pathtree::config::{Config, ConfigBuilder, OutputFormat};
use pathtree::fs::HostFileSystem;
use pathtree::output::Report;
use pathtree::{Encoding, FileName, Interpretation, NormalizeFlags, PathContext};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// How input paths are interpreted.
    pub interp: Option<Interpretation>,

    /// Output format.
    pub format: Option<OutputFormat>,

    /// Tag handles as UTF-8 rather than the system encoding.
    pub utf8: bool,
}

impl GlobalOptions {
    /// The subset of configuration the global flags override.
    fn overrides(&self) -> Config {
        Config {
            interpretation: self.interp,
            encoding: self.utf8.then_some(Encoding::Utf8),
            output_format: self.format,
            ..Config::default()
        }
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .with_config(global.overrides())
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Loads the configuration and opens a context on the host file system.
pub fn open_context(global: &GlobalOptions) -> Result<(Config, PathContext), CliError> {
    let config = load_configuration(global)?;
    let ctx = PathContext::from_config(&config, Box::new(HostFileSystem::new()));
    Ok((config, ctx))
}

/// Parses `base` and makes it absolute, for use as a normalization base.
pub fn resolve_base(ctx: &mut PathContext, base: Option<&str>) -> Result<Option<FileName>, CliError> {
    let Some(text) = base else {
        return Ok(None);
    };
    let parsed = ctx.parse_default(text);
    if parsed.is_absolute() {
        return Ok(Some(parsed));
    }
    Ok(Some(ctx.normalize(&parsed, NormalizeFlags::empty(), None)?))
}

/// Renders `report` in `format` and prints it to stdout.
pub fn print_report(format: OutputFormat, report: &Report) -> Result<(), CliError> {
    let text = format.create_formatter().format(report)?;
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}

/// The configured output format.
pub fn output_format(config: &Config) -> OutputFormat {
    config.output_format.unwrap_or_default()
}
