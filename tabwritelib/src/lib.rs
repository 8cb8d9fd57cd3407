//! # tabwritelib
//!
//! Write in-memory tables as tab- or comma-delimited text.
//!
//! ## Overview
//!
//! A table is a slice of rows, and a row is a slice of [`Cell`]s. Each row is
//! written as one line:
//!
//! - **Numeric cells** are written bare: `42`, `1.5`
//! - **Everything else** is wrapped in double quotes, with inner quotes
//!   doubled: `fred"eric` becomes `"fred""eric"`
//! - **Absent cells** are written as `"null"`
//!
//! A column order map picks which cell goes in each output column, and a
//! visibility mask drops output columns entirely.
//!
//! ## Example
//!
//! ```rust
//! use tabwritelib::{write_csv_table, Cell};
//!
//! let table = vec![
//!     vec![Cell::from(1), Cell::from("a,b")],
//!     vec![Cell::from(2), Cell::from("c")],
//! ];
//!
//! let mut out = Vec::<u8>::new();
//! write_csv_table(&mut out, &table, &[0, 1], &[true, false]).unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert_eq!(text.lines().collect::<Vec<_>>(), ["1", "2"]);
//! ```
//!
//! For repeated writes, a header line or a fixed line ending, use
//! [`TableWriter`] with [`WriteOptions`].

pub mod cell;
pub mod error;
pub mod layout;
pub mod options;
pub mod quote;
pub mod writer;

pub use cell::{Cell, Row};
pub use error::TableError;
pub use layout::ColumnLayout;
pub use options::{Delimiter, LineEnding, WriteOptions};
pub use quote::{quote, write_quoted, write_unquoted};
pub use writer::{write_csv_table, write_delimited_table, write_tab_delimited_table, TableWriter};

/// Result type for tabwritelib operations
pub type Result<T> = std::result::Result<T, TableError>;
