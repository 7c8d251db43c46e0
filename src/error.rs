//! Error types for seatmap.
//!
//! Resolving a seat never fails: unresolvable input is reported as data on
//! [`Resolution`](crate::Resolution). The errors here only come from the
//! edges of the crate, i.e. loading lookup tables and reading or writing
//! CSV. All of them are strongly typed using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating lookup tables.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse lookup tables: {message}")]
    Parse {
        message: String,
    },

    #[error("Failed to read lookup tables from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Table '{table}' contains an empty key or shortname")]
    EmptyEntry {
        table: &'static str,
    },

    #[error("Table '{table}' entry '{entry}' must be lowercase")]
    NotLowercase {
        table: &'static str,
        entry: String,
    },

    #[error("Known input '{input}' maps to unknown shortname '{shortname}'")]
    UnknownShortname {
        input: String,
        shortname: String,
    },
}

/// Errors raised while reading manifests or batch inputs, or writing results.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing required column '{column}'")]
    MissingColumn {
        column: &'static str,
    },

    #[error("Malformed CSV record at line {line}: {message}")]
    Record {
        line: u64,
        message: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Top-level error type for seatmap.
#[derive(Debug, Error)]
pub enum SeatmapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

impl SeatmapError {
    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is a manifest error.
    #[must_use]
    pub const fn is_manifest(&self) -> bool {
        matches!(self, Self::Manifest(_))
    }
}

/// Result type alias for seatmap operations.
pub type SeatmapResult<T> = Result<T, SeatmapError>;
