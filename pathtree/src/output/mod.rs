//! Output formatting for path reports.
//!
//! Commands build a [`Report`] and hand it to the formatter selected by the
//! configured [`OutputFormat`]: plain text for people, JSON for scripts.

mod formatters;
mod reports;

use crate::Result;

pub use crate::config::OutputFormat;
pub use crate::tree::TreeStats;
pub use formatters::{HumanFormatter, JsonFormatter};
pub use reports::{
    ComparisonReport, NormalizeReport, PathReport, RelativeReport, Report, StatsReport,
    ValidationReport,
};

/// Trait for rendering reports into an output format.
pub trait OutputFormatter {
    /// Format the given report into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized.
    fn format(&self, report: &Report) -> Result<String>;
}

impl OutputFormat {
    /// Create a formatter for this output format.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::output::{OutputFormat, RelativeReport, Report};
    ///
    /// let report = Report::Relative(RelativeReport {
    ///     path: "/a/b".into(),
    ///     to: "/a/c".into(),
    ///     relative: "../b".into(),
    /// });
    /// let text = OutputFormat::Human.create_formatter().format(&report).unwrap();
    /// assert_eq!(text, "../b");
    /// ```
    #[must_use]
    pub fn create_formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Human => Box::new(HumanFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}
