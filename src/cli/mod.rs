//! CLI support for formula-lang
//!
//! Provides programmatic access to the `formula` command-line tool so hosts
//! can reuse the same validation and evaluation paths.

mod check;
mod convert;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check, format_formula, list_tokens};
pub use convert::{json_to_values, parse_values};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use log::{LevelFilter, Log, Metadata, Record};

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Formula could not be parsed or evaluated
    #[error("Formula error: {0}")]
    Formula(#[from] crate::FormulaError),
    /// Values input is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A property value that is not a number
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No values provided
    #[error("No values provided. Use --values or pipe a JSON object to stdin.")]
    NoInput,
    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'formula docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Formula(e.into())
    }
}

impl From<crate::EvalError> for CliError {
    fn from(e: crate::EvalError) -> Self {
        CliError::Formula(e.into())
    }
}

/// Writes log records to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Installs the stderr logger: 0 = warnings only, 1 = debug, 2+ = trace.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
