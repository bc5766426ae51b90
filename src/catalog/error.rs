//! Error types for catalog loading.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while reading the open data CSV files.
///
/// Every variant is fatal for a run: the catalog is loaded before any
/// download starts and no partial catalog is used.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The CSV file could not be opened.
    #[error("failed to open {path}: {source}\n  Suggestion: check --opendata-dir points at a checkout of the NGA opendata repository")]
    Open {
        /// The file that could not be opened.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected a record (bad quoting, unequal field count, IO).
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        /// The file being read.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A record has fewer fields than a required column index.
    #[error("{path} line {line}: missing column {column} (record has {found} fields)")]
    MissingColumn {
        /// The file being read.
        path: PathBuf,
        /// 1-based line of the record.
        line: u64,
        /// The 0-based column that was required.
        column: usize,
        /// Number of fields in the record.
        found: usize,
    },

    /// An id column does not hold an integer.
    #[error("{path} line {line}: invalid object id '{value}'")]
    InvalidId {
        /// The file being read.
        path: PathBuf,
        /// 1-based line of the record.
        line: u64,
        /// The offending value.
        value: String,
    },
}

impl ParseError {
    /// Creates an `Open` error.
    #[must_use]
    pub fn open(path: &Path, source: std::io::Error) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a `Csv` error.
    #[must_use]
    pub fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}
