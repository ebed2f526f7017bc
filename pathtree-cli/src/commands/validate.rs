//! Command to check paths against platform naming rules.

use crate::error::CliError;
use crate::utils::{open_context, output_format, print_report, GlobalOptions};
use clap::Args;
use pathtree::output::{Report, ValidationReport};
use pathtree::Interpretation;

/// Check paths for platform validity.
///
/// Every path is reported; the exit code is 1 if any of them is invalid.
#[derive(Args)]
pub struct ValidateCommand {
    /// Paths to check
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Apply Windows rules regardless of the host platform
    #[arg(long)]
    pub windows: bool,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (config, ctx) = open_context(global)?;
        let rules = if self.windows {
            Interpretation::Windows
        } else {
            Interpretation::Host.resolve()
        };

        let reports: Vec<ValidationReport> = self
            .paths
            .iter()
            .map(|text| ValidationReport::new(text, &ctx.parse_default(text), rules))
            .collect();
        let invalid = reports.iter().filter(|r| !r.valid).count();

        print_report(output_format(&config), &Report::Validation(reports))?;

        if invalid > 0 {
            return Err(CliError::SemanticFailure(format!(
                "{invalid} of {} paths are invalid",
                self.paths.len()
            )));
        }
        Ok(())
    }
}
