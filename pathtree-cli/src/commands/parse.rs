//! Command to show how paths parse.

use crate::error::CliError;
use crate::utils::{open_context, output_format, print_report, GlobalOptions};
use clap::Args;
use pathtree::output::{PathReport, Report};

/// Show the components, filesystem and canonical form of paths.
#[derive(Args)]
pub struct ParseCommand {
    /// Paths to parse
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,
}

impl ParseCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (config, ctx) = open_context(global)?;
        let style = config.output_style_or_default();

        let reports = self
            .paths
            .iter()
            .map(|text| PathReport::new(text, &ctx.parse_default(text), style))
            .collect();

        print_report(output_format(&config), &Report::Paths(reports))
    }
}
