//! Command to compare two paths.

use crate::error::CliError;
use crate::utils::{open_context, output_format, print_report, GlobalOptions};
use clap::{Args, ValueEnum};
use pathtree::output::{ComparisonReport, Report};
use pathtree::{CompareFlags, FileComparison};

/// Compare two paths structurally.
#[derive(Args)]
pub struct CompareCommand {
    /// Left-hand path
    #[arg(value_name = "A")]
    pub left: String,

    /// Right-hand path
    #[arg(value_name = "B")]
    pub right: String,

    /// Ignore ASCII case
    #[arg(long)]
    pub case_insensitive: bool,

    /// Compare from the last component toward the root
    #[arg(long)]
    pub final_first: bool,

    /// Fail with exit code 1 unless the comparison has this result
    #[arg(long, value_enum, value_name = "RESULT")]
    pub expect: Option<ExpectedComparison>,
}

/// Comparison result accepted by `--expect`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExpectedComparison {
    /// A sorts before B and is not its prefix
    LessThan,
    /// A is a proper prefix of B
    IsParentOf,
    /// A and B are the same path
    Equal,
    /// B is a proper prefix of A
    IsChildOf,
    /// A sorts after B and does not extend it
    GreaterThan,
}

impl From<ExpectedComparison> for FileComparison {
    fn from(expected: ExpectedComparison) -> Self {
        match expected {
            ExpectedComparison::LessThan => Self::LessThan,
            ExpectedComparison::IsParentOf => Self::IsParentOf,
            ExpectedComparison::Equal => Self::Equal,
            ExpectedComparison::IsChildOf => Self::IsChildOf,
            ExpectedComparison::GreaterThan => Self::GreaterThan,
        }
    }
}

impl CompareCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (config, ctx) = open_context(global)?;
        let mut flags = config.compare_flags();
        if self.case_insensitive {
            flags |= CompareFlags::CASE_INSENSITIVE;
        }
        if self.final_first {
            flags |= CompareFlags::FINAL_FIRST;
        }

        let left = ctx.parse_default(&self.left);
        let right = ctx.parse_default(&self.right);
        let report = ComparisonReport::new(&left, &right, flags);
        let actual = report.comparison;

        print_report(output_format(&config), &Report::Comparison(report))?;

        match self.expect.map(FileComparison::from) {
            Some(expected) if expected != actual => Err(CliError::SemanticFailure(format!(
                "expected {expected}, got {actual}"
            ))),
            _ => Ok(()),
        }
    }
}
