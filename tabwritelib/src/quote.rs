//! CSV-style quoting.
//!
//! A quoted field is wrapped in double quotes and every double quote inside it
//! is doubled: `fred"eric` becomes `"fred""eric"`. No other character is
//! escaped, so delimiters and line breaks inside a quoted field are written
//! as they are.

use std::io::Write;

use crate::cell::Cell;
use crate::Result;

const QUOTE: char = '"';

/// Quote a piece of text, doubling any double quotes it contains.
pub fn quote(text: &str) -> String {
    let mut buffer = String::with_capacity(text.len() + 2);
    buffer.push(QUOTE);
    for ch in text.chars() {
        if ch == QUOTE {
            buffer.push(QUOTE);
        }
        buffer.push(ch);
    }
    buffer.push(QUOTE);
    buffer
}

/// Write a cell's text form surrounded by double quotes.
///
/// Absent cells are written as `"null"`.
pub fn write_quoted<W: Write + ?Sized>(sink: &mut W, cell: &Cell) -> Result<()> {
    sink.write_all(quote(&cell.to_string()).as_bytes())?;
    Ok(())
}

/// Write a cell's text form with no quoting or escaping.
///
/// The table writer only routes numeric cells here.
pub fn write_unquoted<W: Write + ?Sized>(sink: &mut W, cell: &Cell) -> Result<()> {
    write!(sink, "{}", cell)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quoted(cell: &Cell) -> String {
        let mut out = Vec::<u8>::new();
        write_quoted(&mut out, cell).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_quote_plain_text() {
        assert_eq!(quote("hello"), "\"hello\"");
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn test_quote_doubles_inner_quotes() {
        assert_eq!(quote("fred\"eric"), "\"fred\"\"eric\"");
        assert_eq!(quote("\""), "\"\"\"\"");
        assert_eq!(quote("\"\"a"), "\"\"\"\"\"a\"");
    }

    #[test]
    fn test_quote_keeps_delimiters() {
        assert_eq!(quote("a,b\tc"), "\"a,b\tc\"");
    }

    #[test]
    fn test_quote_quote_count() {
        let text = "say \"hi\" and \"bye\"";
        let inner = text.matches('"').count();
        assert_eq!(quote(text).matches('"').count(), inner * 2 + 2);
    }

    #[test]
    fn test_write_quoted_null() {
        assert_eq!(quoted(&Cell::Null), "\"null\"");
    }

    #[test]
    fn test_write_quoted_number_text() {
        assert_eq!(quoted(&Cell::text("42")), "\"42\"");
        assert_eq!(quoted(&Cell::Int(42)), "\"42\"");
    }

    #[test]
    fn test_write_unquoted() {
        let mut out = Vec::<u8>::new();
        write_unquoted(&mut out, &Cell::Int(12)).unwrap();
        write_unquoted(&mut out, &Cell::Float(0.5)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "120.5");
    }
}
