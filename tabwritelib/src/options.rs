//! Output options for the table writer.
//!
//! This module contains the configuration types that control how rows are
//! laid out as text: the field delimiter, the line ending and an optional
//! header line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TableError;

/// Character placed between fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Delimiter {
    /// Tab-delimited output
    #[default]
    Tab,
    /// Comma-delimited output
    Comma,
    /// Any other single character
    Other(char),
}

impl Delimiter {
    /// The delimiter as a character
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Tab => '\t',
            Delimiter::Comma => ',',
            Delimiter::Other(c) => c,
        }
    }
}

impl From<char> for Delimiter {
    fn from(c: char) -> Self {
        match c {
            '\t' => Delimiter::Tab,
            ',' => Delimiter::Comma,
            other => Delimiter::Other(other),
        }
    }
}

impl FromStr for Delimiter {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tab" | "tsv" | "\\t" => return Ok(Delimiter::Tab),
            "comma" | "csv" => return Ok(Delimiter::Comma),
            _ => {}
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Delimiter::from(c)),
            _ => Err(TableError::InvalidDelimiter(s.to_string())),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Tab => f.write_str("tab"),
            Delimiter::Comma => f.write_str("comma"),
            Delimiter::Other(c) => write!(f, "{}", c),
        }
    }
}

/// Terminator written after every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineEnding {
    /// The platform convention: `\r\n` on Windows, `\n` elsewhere
    #[default]
    Native,
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The terminator text
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl FromStr for LineEnding {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" | "platform" => Ok(LineEnding::Native),
            "lf" | "unix" => Ok(LineEnding::Lf),
            "crlf" | "windows" => Ok(LineEnding::CrLf),
            _ => Err(TableError::InvalidLineEnding(s.to_string())),
        }
    }
}

/// Options for writing a delimited table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Field delimiter
    pub delimiter: Delimiter,
    /// Line terminator
    pub line_ending: LineEnding,
    /// Header names, written as a first line when present
    pub header: Option<Vec<String>>,
}

impl WriteOptions {
    /// Create default options (tab delimited, native line endings, no header)
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab-delimited options
    pub fn tab() -> Self {
        Self::new().delimiter(Delimiter::Tab)
    }

    /// Comma-delimited options
    pub fn csv() -> Self {
        Self::new().delimiter(Delimiter::Comma)
    }

    /// Builder: set the delimiter
    pub fn delimiter(mut self, delimiter: impl Into<Delimiter>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Builder: set the line ending
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Builder: set the header names
    pub fn header<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = Some(names.into_iter().map(Into::into).collect());
        self
    }
}
