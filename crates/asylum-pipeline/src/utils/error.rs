//! Error types for the entire library.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in commands and main.rs.
//!
//! The aggregation pipeline itself never fails: bad rows are skipped and bad
//! numbers read as zero. Errors only come from I/O, configuration and output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading source tables
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    /// One or more required tables could not be loaded.
    #[error("Could not load one or more required inputs: {}", format_failures(.0))]
    Sources(Vec<SourceFailure>),
}

/// A single table that failed during a bulk load
#[derive(Debug)]
pub struct SourceFailure {
    /// Table name (e.g. "persons_of_concern")
    pub table: String,

    /// Rendered cause
    pub reason: String,
}

fn format_failures(failures: &[SourceFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.table, f.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid period: {0}")]
    InvalidPeriod(#[from] PeriodParseError),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// A period label that does not look like "<start>-<end>"
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{label}' is not a period label of the form <start>-<end>")]
pub struct PeriodParseError {
    pub label: String,
}

/// Errors that can occur while writing or reading back a chart deck
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// A month cell that is not a month name, abbreviation or number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a month")]
pub struct MonthParseError(pub String);
