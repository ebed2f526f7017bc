//! Build script for pathtree-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("pathtree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse, normalize and compare file path names")
        .long_about(
            "Command-line front end for interning, normalizing and comparing file path names",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interp")
                .long("interp")
                .help("How input paths are interpreted (unix, portable, windows, host, magic)")
                .value_name("STYLE")
                .global(true)
                .env("PATHTREE_INTERPRETATION"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format (human, json)")
                .value_name("FORMAT")
                .global(true)
                .env("PATHTREE_OUTPUT_FORMAT"),
        )
        .arg(
            Arg::new("utf8")
                .long("utf8")
                .help("Tag paths as UTF-8 instead of the system encoding")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("parse")
                .about("Show how paths parse")
                .long_about("Print the components, filesystem and canonical form of each path"),
            Command::new("normalize")
                .about("Normalize paths to canonical absolute form")
                .long_about(
                    "Complete paths against the working directory or --base, fold `.` and `..`, \
                     and optionally resolve symlinks, recase or switch name forms",
                ),
            Command::new("compare")
                .about("Compare two paths")
                .long_about("Report the five-valued comparison, common prefix and hashes of two paths"),
            Command::new("relative")
                .about("Express a path relative to a directory")
                .long_about("Normalize both paths and print the first relative to the second"),
            Command::new("validate")
                .about("Check paths for platform validity")
                .long_about("Check each path against the naming rules of the host or of Windows"),
            Command::new("stats")
                .about("Intern a list of paths and report tree statistics")
                .long_about("Read one path per line from a file or stdin and report how the tree shares them"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("pathtree.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
