//! Output formatter implementations.

use crate::{Error, Result};

use super::{
    ComparisonReport, NormalizeReport, OutputFormatter, PathReport, RelativeReport, Report,
    StatsReport, ValidationReport,
};

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        serde_json::to_string_pretty(report).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}

/// Formatter for human-readable output.
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Paths(paths) => paths.iter().map(format_path).collect::<Vec<_>>().join("\n\n"),
            Report::Normalized(items) => items
                .iter()
                .map(format_normalized)
                .collect::<Vec<_>>()
                .join("\n"),
            Report::Comparison(comparison) => format_comparison(comparison),
            Report::Relative(relative) => format_relative(relative),
            Report::Validation(items) => items
                .iter()
                .map(format_validation)
                .collect::<Vec<_>>()
                .join("\n"),
            Report::Stats(stats) => format_stats(stats),
        })
    }
}

fn format_path(report: &PathReport) -> String {
    let filesystem = if report.filesystem.is_empty() {
        "(none)"
    } else {
        report.filesystem.as_str()
    };
    let mut lines = vec![
        report.input.clone(),
        format!("  canonical:  {}", report.canonical),
        format!("  rendered:   {}", report.rendered),
        format!("  filesystem: {filesystem}"),
        format!("  absolute:   {}", report.absolute),
        format!("  components: {}", report.components.len()),
    ];
    for (i, name) in report.components.iter().enumerate() {
        lines.push(format!("    {i}: {name}"));
    }
    lines.join("\n")
}

fn format_normalized(report: &NormalizeReport) -> String {
    report.normalized.clone()
}

fn format_comparison(report: &ComparisonReport) -> String {
    let mut lines = vec![
        format!("{} {} {}", report.left, report.comparison, report.right),
        format!("  flags:         {}", report.flags),
        format!("  common prefix: {}", report.common_prefix),
    ];
    if let Some(relationship) = report.relationship {
        lines.push(format!("  relationship:  {relationship}"));
    }
    lines.push(format!("  hashes:        {:016x} {:016x}", report.left_hash, report.right_hash));
    lines.join("\n")
}

fn format_relative(report: &RelativeReport) -> String {
    report.relative.clone()
}

fn format_validation(report: &ValidationReport) -> String {
    match &report.reason {
        None => format!("valid: {}", report.input),
        Some(reason) => format!("invalid: {}: {reason}", report.input),
    }
}

fn format_stats(report: &StatsReport) -> String {
    [
        format!("paths:           {}", report.paths),
        format!("distinct paths:  {}", report.distinct),
        format!("input bytes:     {}", report.input_bytes),
        format!("live nodes:      {}", report.tree.live_nodes),
        format!("table slots:     {}", report.tree.table_len),
        format!("free slots:      {}", report.tree.free_slots),
        format!("max depth:       {}", report.tree.max_depth),
        format!("estimated bytes: {}", report.tree.estimated_bytes),
    ]
    .join("\n")
}
