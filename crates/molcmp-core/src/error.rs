//! Error types for the comparator pipeline
//!
//! Normalization itself never fails. Only the row plumbing around it
//! (reading input, picking columns) returns `Result<T, Error>`.

use thiserror::Error;

/// Comparator error types
#[derive(Debug, Error)]
pub enum Error {
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row has fewer fields than the requested column
    #[error("line {line}: column {column} requested but only {found} field(s) present")]
    MissingColumn {
        line: usize,
        column: usize,
        found: usize,
    },

    /// Column indices are 1-based
    #[error("invalid column {0}: columns are numbered from 1")]
    InvalidColumn(usize),

    /// Both formulas would be read from the same column
    #[error("column A and B must be different (both are {0})")]
    SameColumns(usize),

    /// Splitting on an empty separator would cut a row into characters
    #[error("separator must not be empty")]
    EmptySeparator,

    /// Canonical form would exceed the rendering limit
    #[error("canonical form of {length} symbols exceeds the limit of {limit}")]
    FormulaTooLong { length: usize, limit: usize },

    /// Failure attributed to one input line
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

/// Result type alias for comparator operations
pub type Result<T> = std::result::Result<T, Error>;
