//! Structured error types for gridview.
//!
//! The engine itself absorbs almost every irregular condition as a no-op;
//! these errors cover the few fallible surfaces: configuration, fixed-region
//! validation, per-sample measurement and CLI I/O.

use crate::types::ColumnId;

/// All errors that can occur in gridview.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Configuration or scenario JSON could not be decoded.
    #[error("Configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Fixed rows must be a contiguous prefix of the grid's rows.
    #[error("Fixed rows must be a leading prefix, row {row} is not row {expected}")]
    NonContiguousFixedRows {
        /// Row found outside the prefix.
        row: usize,
        /// Row the prefix expected at that position.
        expected: usize,
    },

    /// Fixed columns must be a contiguous prefix of the visible leaf columns.
    #[error("Fixed columns must be the first {expected} visible leaf columns, {column} breaks the prefix")]
    NonContiguousFixedColumns {
        /// First column found outside the prefix.
        column: ColumnId,
        /// Size of the requested fixed set.
        expected: usize,
    },

    /// Column id does not name a known leaf column.
    #[error("Unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// A single auto-size sample could not be measured.
    #[error("Measurement failed: {reason}")]
    Measurement {
        /// Sampled row index, `None` for an unbound cell.
        row: Option<usize>,
        /// Why the measurement failed.
        reason: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;
