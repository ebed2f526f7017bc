//! Command to intern a list of paths and report tree statistics.

use crate::error::CliError;
use crate::utils::{load_configuration, output_format, print_report, GlobalOptions};
use clap::Args;
use pathtree::output::{Report, StatsReport};
use pathtree::{Interpretation, PathTree};
use std::collections::HashSet;
use std::io::Read;
use std::path::PathBuf;

/// Intern every line of a file and report how much the tree shares.
#[derive(Args)]
pub struct StatsCommand {
    /// File with one path per line (stdin if omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl StatsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let text = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        let report = intern_lines(&text, config.interpretation_or_default())?;
        print_report(output_format(&config), &Report::Stats(report))
    }
}

/// Parses each non-empty line into a fresh tree, keeping every handle alive
/// until the statistics are taken.
fn intern_lines(text: &str, interp: Interpretation) -> Result<StatsReport, CliError> {
    let tree = PathTree::new();
    let names: Vec<_> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| tree.parse(line, interp))
        .collect();
    let distinct = names.iter().collect::<HashSet<_>>().len();
    log::debug!("interned {} paths, {distinct} distinct", names.len());

    Ok(StatsReport {
        paths: names.len(),
        distinct,
        input_bytes: text.len(),
        tree: tree.stats()?,
    })
}
