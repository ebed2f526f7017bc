//! Logging infrastructure for the pathtree library.
//!
//! Library code reports through the `log` facade (the normalizer logs the
//! initial path it settles on and cache clears). This module provides the
//! stderr backend used by the CLI, gated by a three-step verbosity level.

use std::env;
use std::fmt;

/// Environment variable selecting the verbosity when no flag is given.
pub const LOG_MODE_VAR: &str = "PATHTREE_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use pathtree::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Nothing is printed.
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Everything down to debug records.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `quiet`, `normal` or `verbose`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathtree::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("chatty").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// Maps this verbosity onto the `log` crate's level filter.
    #[must_use]
    pub const fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

/// Stderr backend for the `log` facade.
///
/// # Examples
///
/// ```
/// use pathtree::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Verbose);
/// assert_eq!(logger.level(), LogLevel::Verbose);
/// logger.install();
/// log::debug!("shown on stderr");
/// ```
#[derive(Debug, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger printing records up to `level`.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Registers this logger as the global `log` backend.
    ///
    /// Installing a second logger is a no-op.
    pub fn install(self) {
        let filter = self.level.to_level_filter();
        if log::set_boxed_logger(Box::new(self)).is_ok() {
            log::set_max_level(filter);
        }
    }
}

/// The line printed for one record.
fn format_record(level: log::Level, message: &fmt::Arguments<'_>) -> String {
    let tag = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN",
        log::Level::Info => "INFO",
        log::Level::Debug | log::Level::Trace => "DEBUG",
    };
    format!("{tag}: {message}")
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.to_level_filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

/// Picks the logger for a run.
///
/// `verbose` wins over `quiet`; with neither, [`LOG_MODE_VAR`] is consulted
/// and an unrecognized value falls back to [`LogLevel::Normal`].
///
/// # Examples
///
/// ```
/// use pathtree::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }
    let level = env::var(LOG_MODE_VAR)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .unwrap_or_default();
    Logger::new(level)
}
