//! Command to normalize paths.

use crate::error::CliError;
use crate::utils::{open_context, output_format, print_report, resolve_base, GlobalOptions};
use clap::Args;
use pathtree::output::{NormalizeReport, Report};
use pathtree::{Interpretation, NormalizeFlags};

/// Normalize paths to canonical absolute form.
///
/// Flags given here are added to those set in configuration.
#[derive(Args)]
pub struct NormalizeCommand {
    /// Paths to normalize
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Complete relative paths against this directory instead of the working directory
    #[arg(long, value_name = "DIR")]
    pub base: Option<String>,

    /// Replace every symlink by its target
    #[arg(long)]
    pub resolve_symlinks: bool,

    /// Lowercase every component
    #[arg(long)]
    pub lowercase: bool,

    /// Use the on-disk spelling of each component
    #[arg(long)]
    pub normalize_case: bool,

    /// Keep `..` components
    #[arg(long)]
    pub preserve_relative: bool,

    /// Expand 8.3 short names
    #[arg(long, conflicts_with = "short_name")]
    pub long_name: bool,

    /// Use 8.3 short names where they exist
    #[arg(long)]
    pub short_name: bool,

    /// Separator style for output (unix, portable, windows)
    #[arg(long, value_name = "STYLE", value_parser = Interpretation::parse)]
    pub style: Option<Interpretation>,
}

impl NormalizeCommand {
    fn flags(&self) -> NormalizeFlags {
        let mut flags = NormalizeFlags::empty();
        flags.set(NormalizeFlags::RESOLVE_SYMLINKS, self.resolve_symlinks);
        flags.set(NormalizeFlags::LOWERCASE_ALWAYS, self.lowercase);
        flags.set(NormalizeFlags::NORMALIZE_CASE, self.normalize_case);
        flags.set(NormalizeFlags::PRESERVE_RELATIVE, self.preserve_relative);
        flags.set(NormalizeFlags::LONG_NAME, self.long_name);
        flags.set(NormalizeFlags::SHORT_NAME, self.short_name);
        flags
    }

    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (config, mut ctx) = open_context(global)?;
        let mut flags = config.normalize_flags() | self.flags();
        // A name form chosen on the command line replaces the configured one
        if self.long_name {
            flags.remove(NormalizeFlags::SHORT_NAME);
        } else if self.short_name {
            flags.remove(NormalizeFlags::LONG_NAME);
        }

        let style = match self.style {
            Some(style) if style.resolve() != style => {
                return Err(CliError::InvalidArguments(format!(
                    "output style must be unix, portable or windows, not {style}"
                )));
            }
            Some(style) => style,
            None => config.output_style_or_default(),
        };

        let base = resolve_base(&mut ctx, self.base.as_deref())?;
        let mut reports = Vec::with_capacity(self.paths.len());
        for text in &self.paths {
            let name = ctx.parse_default(text);
            let (normalized, changed) = ctx.normalize_with_change(&name, flags, base.as_ref())?;
            reports.push(NormalizeReport::new(text, &normalized, changed, flags, style));
        }

        print_report(output_format(&config), &Report::Normalized(reports))
    }
}
