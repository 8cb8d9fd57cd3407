//! The delimited table writer.
//!
//! Each row becomes one line. Output column `i` takes the cell at
//! `column_order[i]`, is skipped entirely when `column_visible[i]` is false,
//! and is otherwise written bare (numeric cells) or quoted (everything else).
//!
//! The delimiter after a field is suppressed once the column position reaches
//! `row.len() - 1 - hidden`, where `hidden` is the number of hidden columns in
//! the whole mask, not the number seen so far. This gives no trailing delimiter
//! when the hidden columns are a suffix of the layout. When a hidden column
//! sits before the last visible one, the count drops delimiters between
//! visible fields.

use log::{debug, trace};
use std::io::Write;

use crate::cell::Cell;
use crate::error::TableError;
use crate::layout::ColumnLayout;
use crate::options::{LineEnding, WriteOptions};
use crate::quote::{write_quoted, write_unquoted};
use crate::Result;

/// Write a table using tab characters to delimit the fields.
pub fn write_tab_delimited_table<W, R>(
    sink: &mut W,
    table: &[R],
    column_order: &[usize],
    column_visible: &[bool],
) -> Result<()>
where
    W: Write + ?Sized,
    R: AsRef<[Cell]>,
{
    write_delimited_table(sink, table, column_order, column_visible, '\t')
}

/// Write a table using commas to delimit the fields.
pub fn write_csv_table<W, R>(
    sink: &mut W,
    table: &[R],
    column_order: &[usize],
    column_visible: &[bool],
) -> Result<()>
where
    W: Write + ?Sized,
    R: AsRef<[Cell]>,
{
    write_delimited_table(sink, table, column_order, column_visible, ',')
}

/// Write a table using the given delimiter, then flush the sink.
///
/// `column_order` maps each output column to a cell index in the row and
/// `column_visible` says which output columns are written. Every row is
/// terminated with the platform line ending.
///
/// An index that does not fit the order map, the row or the mask stops the
/// write with [`TableError::ColumnOutOfRange`]. Lines already written stay in
/// the sink and the sink is not flushed.
pub fn write_delimited_table<W, R>(
    sink: &mut W,
    table: &[R],
    column_order: &[usize],
    column_visible: &[bool],
    delimiter: char,
) -> Result<()>
where
    W: Write + ?Sized,
    R: AsRef<[Cell]>,
{
    let rows = write_rows(
        sink,
        table,
        column_order,
        column_visible,
        delimiter,
        LineEnding::Native,
        0,
    )?;
    sink.flush()?;
    debug!("wrote {} rows delimited by {:?}", rows, delimiter);
    Ok(())
}

/// Write each row as one line. Returns the number of rows written.
fn write_rows<W, R>(
    sink: &mut W,
    table: &[R],
    column_order: &[usize],
    column_visible: &[bool],
    delimiter: char,
    line_ending: LineEnding,
    first_row: usize,
) -> Result<usize>
where
    W: Write + ?Sized,
    R: AsRef<[Cell]>,
{
    let hidden = column_visible.iter().filter(|v| !**v).count();
    let mut encoded = [0u8; 4];
    let delimiter = delimiter.encode_utf8(&mut encoded).as_bytes();

    for (offset, row) in table.iter().enumerate() {
        let row = row.as_ref();
        let row_index = first_row + offset;
        // signed: a mask with more hidden columns than the row has cells
        let last_separated = row.len() as isize - 1 - hidden as isize;

        for position in 0..row.len() {
            let index = *column_order
                .get(position)
                .ok_or(TableError::ColumnOutOfRange {
                    row: row_index,
                    position,
                    index: position,
                    len: column_order.len(),
                })?;
            let cell = row.get(index).ok_or(TableError::ColumnOutOfRange {
                row: row_index,
                position,
                index,
                len: row.len(),
            })?;
            let shown = *column_visible
                .get(position)
                .ok_or(TableError::ColumnOutOfRange {
                    row: row_index,
                    position,
                    index: position,
                    len: column_visible.len(),
                })?;

            if !shown {
                trace!("row {}: skipping hidden column {}", row_index, position);
                continue;
            }

            if cell.is_numeric() {
                write_unquoted(sink, cell)?;
            } else {
                write_quoted(sink, cell)?;
            }

            if (position as isize) < last_separated {
                sink.write_all(delimiter)?;
            }
        }

        sink.write_all(line_ending.as_str().as_bytes())?;
    }

    Ok(table.len())
}

/// A configured writer that owns its sink.
///
/// Rows may be written in several calls; the header, if any, is written once
/// before the first row and must hold one name per output column. Call [`TableWriter::finish`] to flush.
///
/// ```
/// use tabwritelib::{Cell, ColumnLayout, TableWriter, WriteOptions, LineEnding};
///
/// let mut writer = TableWriter::new(
///     Vec::<u8>::new(),
///     WriteOptions::csv().line_ending(LineEnding::Lf).header(["id", "name"]),
/// );
/// let table = vec![vec![Cell::from(1), Cell::from("a,b")]];
/// writer.write_table(&table, &ColumnLayout::identity(2)).unwrap();
/// writer.finish().unwrap();
///
/// let text = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(text, "\"id\",\"name\"\n1,\"a,b\"\n");
/// ```
#[derive(Debug)]
pub struct TableWriter<W: Write> {
    sink: W,
    options: WriteOptions,
    rows_written: usize,
    header_pending: bool,
}

impl<W: Write> TableWriter<W> {
    /// Create a writer over `sink`
    pub fn new(sink: W, options: WriteOptions) -> Self {
        let header_pending = options.header.is_some();
        Self {
            sink,
            options,
            rows_written: 0,
            header_pending,
        }
    }

    /// The options this writer was built with
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Write every row of `table`. Returns the number of rows written.
    pub fn write_table<R: AsRef<[Cell]>>(
        &mut self,
        table: &[R],
        layout: &ColumnLayout,
    ) -> Result<usize> {
        self.write_header(layout)?;
        let written = write_rows(
            &mut self.sink,
            table,
            layout.order(),
            layout.visible(),
            self.options.delimiter.as_char(),
            self.options.line_ending,
            self.rows_written,
        )?;
        self.rows_written += written;
        debug!(
            "wrote {} rows ({} total) delimited by {}",
            written, self.rows_written, self.options.delimiter
        );
        Ok(written)
    }

    /// Write a single row.
    pub fn write_row(&mut self, row: &[Cell], layout: &ColumnLayout) -> Result<()> {
        self.write_table(&[row], layout)?;
        Ok(())
    }

    /// Write the pending header (if any) and flush the sink.
    pub fn finish(&mut self) -> Result<()> {
        if self.header_pending {
            let columns = self.options.header.as_ref().map_or(0, Vec::len);
            self.write_header(&ColumnLayout::identity(columns))?;
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Get a reference to the underlying sink
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Unwrap the sink. Does not flush.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Header names label output columns, so the order map does not apply to
    /// them. The visibility mask and delimiter rule do.
    fn write_header(&mut self, layout: &ColumnLayout) -> Result<()> {
        if !self.header_pending {
            return Ok(());
        }
        let header: Vec<Cell> = match &self.options.header {
            Some(names) => names.iter().map(|name| Cell::text(name.as_str())).collect(),
            None => return Ok(()),
        };
        if header.len() != layout.len() {
            return Err(TableError::HeaderMismatch {
                names: header.len(),
                columns: layout.len(),
            });
        }
        let positions: Vec<usize> = (0..header.len()).collect();
        write_rows(
            &mut self.sink,
            &[header],
            &positions,
            layout.visible(),
            self.options.delimiter.as_char(),
            self.options.line_ending,
            0,
        )?;
        self.header_pending = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Delimiter;

    fn sample_table() -> Vec<Vec<Cell>> {
        vec![
            vec![Cell::from(1), Cell::from("a,b")],
            vec![Cell::from(2), Cell::from("c")],
        ]
    }

    fn render(table: &[Vec<Cell>], order: &[usize], visible: &[bool], delimiter: char) -> String {
        let mut out = Vec::<u8>::new();
        write_delimited_table(&mut out, table, order, visible, delimiter).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn nl() -> &'static str {
        LineEnding::Native.as_str()
    }

    #[test]
    fn test_csv_all_visible() {
        let out = render(&sample_table(), &[0, 1], &[true, true], ',');
        assert_eq!(out, format!("1,\"a,b\"{nl}2,\"c\"{nl}", nl = nl()));
    }

    #[test]
    fn test_hidden_suffix_column() {
        let out = render(&sample_table(), &[0, 1], &[true, false], ',');
        assert_eq!(out, format!("1{nl}2{nl}", nl = nl()));
    }

    #[test]
    fn test_reordered_columns() {
        let out = render(&sample_table(), &[1, 0], &[true, true], '\t');
        assert_eq!(out, format!("\"a,b\"\t1{nl}\"c\"\t2{nl}", nl = nl()));
    }

    #[test]
    fn test_null_and_quotes() {
        let table = vec![vec![Cell::Null, Cell::from("fred\"eric"), Cell::from(2.5)]];
        let out = render(&table, &[0, 1, 2], &[true, true, true], ',');
        assert_eq!(out, format!("\"null\",\"fred\"\"eric\",2.5{nl}", nl = nl()));
    }

    #[test]
    fn test_numeric_text_is_quoted() {
        let table = vec![vec![Cell::from("7"), Cell::from(7)]];
        let out = render(&table, &[0, 1], &[true, true], ',');
        assert_eq!(out, format!("\"7\",7{nl}", nl = nl()));
    }

    #[test]
    fn test_hidden_leading_column_keeps_legacy_separators() {
        // hidden count is subtracted from the end, so the only separator
        // between the two visible fields is dropped
        let table = vec![vec![Cell::from(1), Cell::from(2), Cell::from(3)]];
        let out = render(&table, &[0, 1, 2], &[false, true, true], ',');
        assert_eq!(out, format!("23{nl}", nl = nl()));
    }

    #[test]
    fn test_hidden_middle_column_keeps_legacy_separators() {
        let table = vec![vec![
            Cell::from(1),
            Cell::from(2),
            Cell::from(3),
            Cell::from(4),
        ]];
        let out = render(&table, &[0, 1, 2, 3], &[true, false, true, true], ',');
        assert_eq!(out, format!("1,34{nl}", nl = nl()));
    }

    #[test]
    fn test_all_hidden_writes_empty_lines() {
        let out = render(&sample_table(), &[0, 1], &[false, false], ',');
        assert_eq!(out, format!("{nl}{nl}", nl = nl()));
    }

    #[test]
    fn test_empty_row_and_empty_table() {
        let table: Vec<Vec<Cell>> = vec![vec![]];
        assert_eq!(render(&table, &[], &[], ','), nl());
        assert_eq!(render(&[], &[0], &[true], ','), "");
    }

    #[test]
    fn test_multibyte_delimiter_char() {
        let out = render(&sample_table(), &[0, 1], &[true, true], '¦');
        assert_eq!(out, format!("1¦\"a,b\"{nl}2¦\"c\"{nl}", nl = nl()));
    }

    #[test]
    fn test_tab_and_csv_differ_only_in_separator() {
        let table = sample_table();
        let mut tab = Vec::<u8>::new();
        let mut csv = Vec::<u8>::new();
        write_tab_delimited_table(&mut tab, &table, &[1, 0], &[true, true]).unwrap();
        write_csv_table(&mut csv, &table, &[1, 0], &[true, true]).unwrap();
        let tab = String::from_utf8(tab).unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert_eq!(tab.replace('\t', ","), csv);
    }

    #[test]
    fn test_order_index_out_of_row() {
        let mut out = Vec::<u8>::new();
        let err = write_csv_table(&mut out, &sample_table(), &[0, 5], &[true, true]).unwrap_err();
        assert!(matches!(
            err,
            TableError::ColumnOutOfRange {
                row: 0,
                position: 1,
                index: 5,
                len: 2
            }
        ));
        // the first field and its delimiter were already written
        assert_eq!(out, b"1,".to_vec());
    }

    #[test]
    fn test_order_map_too_short() {
        let mut out = Vec::<u8>::new();
        let err = write_csv_table(&mut out, &sample_table(), &[0], &[true, true]).unwrap_err();
        assert!(matches!(
            err,
            TableError::ColumnOutOfRange {
                position: 1,
                len: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_mask_too_short() {
        let mut out = Vec::<u8>::new();
        let err = write_csv_table(&mut out, &sample_table(), &[0, 1], &[true]).unwrap_err();
        assert!(matches!(
            err,
            TableError::ColumnOutOfRange {
                position: 1,
                len: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_error_reports_failing_row() {
        let table = vec![vec![Cell::from(1), Cell::from(2)], vec![Cell::from(3)]];
        let mut out = Vec::<u8>::new();
        let err = write_csv_table(&mut out, &table, &[1, 0], &[true, true]).unwrap_err();
        assert!(matches!(err, TableError::ColumnOutOfRange { row: 1, .. }));
    }

    #[test]
    fn test_table_writer_with_header() {
        let mut writer = TableWriter::new(
            Vec::<u8>::new(),
            WriteOptions::csv()
                .line_ending(LineEnding::Lf)
                .header(["id", "name"]),
        );
        let written = writer
            .write_table(&sample_table(), &ColumnLayout::identity(2))
            .unwrap();
        writer.finish().unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(writer.into_inner()).unwrap(),
            "\"id\",\"name\"\n1,\"a,b\"\n2,\"c\"\n"
        );
    }

    #[test]
    fn test_table_writer_header_follows_visibility() {
        let mut writer = TableWriter::new(
            Vec::<u8>::new(),
            WriteOptions::new()
                .delimiter(Delimiter::Other(';'))
                .line_ending(LineEnding::CrLf)
                .header(["id", "name"]),
        );
        let layout = ColumnLayout::identity(2).hide(0);
        writer.write_table(&sample_table(), &layout).unwrap();
        writer.finish().unwrap();
        assert_eq!(
            String::from_utf8(writer.into_inner()).unwrap(),
            "\"name\"\r\n\"a,b\"\r\n\"c\"\r\n"
        );
    }

    #[test]
    fn test_table_writer_header_is_not_reordered() {
        let mut writer = TableWriter::new(
            Vec::<u8>::new(),
            WriteOptions::csv()
                .line_ending(LineEnding::Lf)
                .header(["name", "id"]),
        );
        writer
            .write_table(&sample_table(), &ColumnLayout::with_order(vec![1, 0]))
            .unwrap();
        writer.finish().unwrap();
        assert_eq!(
            String::from_utf8(writer.into_inner()).unwrap(),
            "\"name\",\"id\"\n\"a,b\",1\n\"c\",2\n"
        );
    }

    #[test]
    fn test_table_writer_header_length_mismatch() {
        let mut writer = TableWriter::new(
            Vec::<u8>::new(),
            WriteOptions::csv().line_ending(LineEnding::Lf).header(["id"]),
        );
        let layout = ColumnLayout::with_order(vec![1, 0]);
        let err = writer
            .write_row(&[Cell::from(1), Cell::from("x")], &layout)
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::HeaderMismatch {
                names: 1,
                columns: 2
            }
        ));
        assert_eq!(writer.rows_written(), 0);
        assert!(writer.get_ref().is_empty());

        // nothing was written, so a retry with a matching layout writes the header once
        writer
            .write_row(&[Cell::from(1)], &ColumnLayout::identity(1))
            .unwrap();
        writer.finish().unwrap();
        assert_eq!(writer.get_ref().as_slice(), b"\"id\"\n1\n");
    }

    #[test]
    fn test_table_writer_header_only() {
        let mut writer = TableWriter::new(
            Vec::<u8>::new(),
            WriteOptions::tab().line_ending(LineEnding::Lf).header(["a", "b"]),
        );
        writer.finish().unwrap();
        assert_eq!(writer.rows_written(), 0);
        assert_eq!(writer.get_ref().as_slice(), b"\"a\"\t\"b\"\n");
    }

    #[test]
    fn test_table_writer_rows_across_calls() {
        let layout = ColumnLayout::identity(2);
        let mut writer = TableWriter::new(
            Vec::<u8>::new(),
            WriteOptions::csv().line_ending(LineEnding::Lf),
        );
        writer
            .write_row(&[Cell::from(1), Cell::from("x")], &layout)
            .unwrap();
        writer
            .write_row(&[Cell::from(2), Cell::Null], &layout)
            .unwrap();
        writer.finish().unwrap();
        assert_eq!(writer.rows_written(), 2);
        assert_eq!(
            String::from_utf8(writer.into_inner()).unwrap(),
            "1,\"x\"\n2,\"null\"\n"
        );
    }

    #[test]
    fn test_table_writer_error_row_index_counts_previous_calls() {
        let mut writer = TableWriter::new(Vec::<u8>::new(), WriteOptions::csv());
        let layout = ColumnLayout::identity(2);
        writer.write_table(&sample_table(), &layout).unwrap();
        let err = writer
            .write_row(&[Cell::from(1)], &ColumnLayout::with_order(vec![3]))
            .unwrap_err();
        assert!(matches!(err, TableError::ColumnOutOfRange { row: 2, .. }));
    }

    #[test]
    fn test_file_sink_is_flushed_not_closed() {
        let mut file = tempfile::tempfile().unwrap();
        write_csv_table(&mut file, &sample_table(), &[0, 1], &[true, true]).unwrap();
        // still usable after the call
        file.write_all(b"tail").unwrap();
    }
}
