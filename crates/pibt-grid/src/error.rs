//! Grid-subsystem error type.

use thiserror::Error;

/// Errors produced by `pibt-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("map rows have inconsistent widths: row {row} has {got} cells, expected {expected}")]
    RaggedRows { row: usize, expected: usize, got: usize },

    #[error("map header declares {expected} rows but {got} were found")]
    RowCountMismatch { expected: usize, got: usize },

    #[error("map parse error: {0}")]
    Map(String),

    #[error("scenario parse error: {0}")]
    Scenario(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;
