//! Main entry point for the pathtree CLI.
//!
//! This is the command-line interface over the pathtree library:
//! - `parse`: Show how paths parse
//! - `normalize`: Normalize paths to canonical absolute form
//! - `compare`: Compare two paths
//! - `relative`: Express a path relative to a directory
//! - `validate`: Check paths for platform validity
//! - `stats`: Report interning statistics for a list of paths

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Library diagnostics go through `log`; route them to stderr
    pathtree::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        interp: cli.interp,
        format: cli.format,
        utf8: cli.utf8,
    };

    let result = match cli.command {
        cli::Command::Parse(cmd) => cmd.execute(&global),
        cli::Command::Normalize(cmd) => cmd.execute(&global),
        cli::Command::Compare(cmd) => cmd.execute(&global),
        cli::Command::Relative(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Stats(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
