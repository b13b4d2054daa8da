//! Loader error types.

use thiserror::Error;

/// Failure while reading a readings table.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV (bad quoting, missing columns, wrong header).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A `Timestamp` cell did not match any accepted format.
    #[error("Row {row}: unparseable timestamp '{value}'")]
    Timestamp {
        /// 1-based data row number (header excluded).
        row: usize,
        /// Raw cell content.
        value: String,
    },

    /// A `Value` cell was neither a number nor a missing-value marker.
    #[error("Row {row}: unparseable value '{value}'")]
    Value {
        /// 1-based data row number (header excluded).
        row: usize,
        /// Raw cell content.
        value: String,
    },

    /// One variable was reported in more than one unit.
    #[error("Variable '{variable}' is reported in both '{first}' and '{second}'")]
    MixedUnits {
        /// Variable name.
        variable: String,
        /// Unit seen first.
        first: String,
        /// Conflicting unit.
        second: String,
    },

    /// The table held no usable readings.
    #[error("No readings found")]
    Empty,
}

/// Result alias for the loader.
pub type LoaderResult<T> = Result<T, LoaderError>;
