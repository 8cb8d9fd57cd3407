//! Error types for tabwritelib

use thiserror::Error;

/// Errors that can occur while writing a delimited table
#[derive(Error, Debug)]
pub enum TableError {
    /// A column position or index did not fit the row, order map or mask
    #[error(
        "row {row}, column {position}: index {index} is out of range (length {len})"
    )]
    ColumnOutOfRange {
        row: usize,
        position: usize,
        index: usize,
        len: usize,
    },

    /// Column order map and visibility mask have different lengths
    #[error("column order has {order} entries but visibility mask has {visible}")]
    LayoutMismatch { order: usize, visible: usize },

    /// Header names do not match the number of output columns
    #[error("header has {names} names but the layout has {columns} columns")]
    HeaderMismatch { names: usize, columns: usize },

    /// Delimiter string could not be parsed
    #[error("invalid delimiter '{0}': expected tab, comma or a single character")]
    InvalidDelimiter(String),

    /// Line ending string could not be parsed
    #[error("invalid line ending '{0}': expected native, lf or crlf")]
    InvalidLineEnding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
