//! Cell values: the fields that make up a row.
//!
//! A cell is either numeric, text, or absent. Numeric cells are written bare;
//! everything else is quoted. The split is carried by the type rather than
//! inspected at write time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field in a row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// An integer value
    Int(i64),
    /// A floating point value
    Float(f64),
    /// Arbitrary text
    Text(String),
    /// An absent value, rendered as the text `null`
    #[default]
    Null,
}

/// A row of cells.
pub type Row = Vec<Cell>;

impl Cell {
    /// Create a text cell
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Check if this cell is written without quotes
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }

    /// Check if this is the absent marker
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write_float(f, *v),
            Cell::Text(s) => f.write_str(s),
            Cell::Null => f.write_str("null"),
        }
    }
}

/// Write a float in plain decimal notation with at least one fractional
/// digit: `1.0`, `0.0000001`, `100000000000000000000.0`. Non-finite values
/// are written as `Infinity`, `-Infinity` and `NaN`.
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let text = v.to_string();
    if text.contains('.') {
        f.write_str(&text)
    } else {
        write!(f, "{}.0", text)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Int(value.into())
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Int(value.into())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Null)
    }
}
