//! Command to express a path relative to a directory.

use crate::error::CliError;
use crate::utils::{open_context, output_format, print_report, resolve_base, GlobalOptions};
use clap::Args;
use pathtree::output::{RelativeReport, Report};
use pathtree::CompareFlags;

/// Express a path relative to a directory.
///
/// Both are normalized first. When they share nothing the normalized
/// path is printed unchanged.
#[derive(Args)]
pub struct RelativeCommand {
    /// Path to express
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Directory to express it from
    #[arg(value_name = "TO")]
    pub to: String,

    /// Match components ignoring ASCII case
    #[arg(long)]
    pub case_insensitive: bool,

    /// Complete relative inputs against this directory
    #[arg(long, value_name = "DIR")]
    pub base: Option<String>,
}

impl RelativeCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (config, mut ctx) = open_context(global)?;
        // Final-first order has no notion of a shared prefix
        let mut flags = config.compare_flags() - CompareFlags::FINAL_FIRST;
        if self.case_insensitive {
            flags |= CompareFlags::CASE_INSENSITIVE;
        }

        let base = resolve_base(&mut ctx, self.base.as_deref())?;
        let path = ctx.parse_default(&self.path);
        let to = ctx.parse_default(&self.to);
        let relative = ctx.make_relative(&path, &to, flags, base.as_ref())?;

        let report = RelativeReport {
            path: self.path,
            to: self.to,
            relative: ctx.render(&relative),
        };
        print_report(output_format(&config), &Report::Relative(report))
    }
}
