//! Error types for the simulation core and its snapshot collaborators

use std::path::PathBuf;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, LifeError>;

/// Errors raised by grid construction, indexing, rules and snapshot I/O
#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    /// Grid dimensions were negative, overflowed, or rows were ragged.
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimension {
        /// Requested row count.
        rows: i64,
        /// Requested column count.
        cols: i64,
    },

    /// A coordinate fell outside the grid.
    #[error("coordinates ({row}, {col}) out of range for {rows}x{cols} grid")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        cols: usize,
    },

    /// A snapshot could not be parsed.
    #[error("malformed grid snapshot: {0}")]
    MalformedInput(String),

    /// A rulestring or rule name could not be resolved.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// Reading or writing a snapshot file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl LifeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
