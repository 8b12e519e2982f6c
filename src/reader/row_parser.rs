//! Plain row reader with sequential-read seek avoidance.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{InterpolationError, InterpolationResult};
use crate::types::{Row, RowIndex};

use super::{LineIndex, ReaderStats, RowSource};

/// Reads individual rows from a seekable delimited-text stream.
///
/// Reading row `i` right after row `i - 1` continues from the current parser position.
/// Any other request repositions the stream at the start of line `i` and restarts the
/// field parser there.
pub struct RowParser<R> {
    reader: csv::Reader<R>,
    index: LineIndex,
    record: csv::StringRecord,
    last_row: RowIndex,
    seeks: u64,
    reads: u64,
}

impl<R: Read + Seek> RowParser<R> {
    /// Create a comma-delimited row parser over `data`, e.g. an opened file.
    pub fn new(data: R) -> Self {
        Self::with_delimiter(data, b',')
    }

    /// Create a row parser splitting fields on `delimiter`.
    pub fn with_delimiter(data: R, delimiter: u8) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .delimiter(delimiter)
            .from_reader(data);
        Self {
            reader,
            index: LineIndex::new(),
            record: csv::StringRecord::new(),
            last_row: 0,
            seeks: 0,
            reads: 0,
        }
    }

    /// Index of the row most recently requested (0 before the first request).
    ///
    /// This is updated before the read is attempted, so a request for a missing row still
    /// moves the cursor: asking for `i + 1` afterwards is treated as sequential.
    pub fn last_row(&self) -> RowIndex {
        self.last_row
    }

    /// The line index used to find seek targets.
    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }

    /// Consume the parser, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn seek_to_line(&mut self, index: RowIndex) -> InterpolationResult<()> {
        let offset = self
            .index
            .line_start(self.reader.get_mut(), index)?
            .ok_or(InterpolationError::EndOfInput)?;

        let mut pos = csv::Position::new();
        pos.set_byte(offset).set_line(index).set_record(index - 1);
        self.reader.seek_raw(SeekFrom::Start(offset), pos)?;
        self.seeks += 1;
        Ok(())
    }
}

impl<R: Read + Seek> RowSource for RowParser<R> {
    fn get_row(&mut self, index: RowIndex) -> InterpolationResult<Row> {
        if index == 0 {
            return Err(InterpolationError::EndOfInput);
        }

        let last = self.last_row;
        self.last_row = index;
        self.reads += 1;

        if last.checked_add(1) != Some(index) {
            self.seek_to_line(index)?;
        }

        if self.reader.read_record(&mut self.record)? {
            Ok(self.record.iter().map(str::to_owned).collect())
        } else {
            Err(InterpolationError::EndOfInput)
        }
    }

    fn stats(&self) -> ReaderStats {
        ReaderStats {
            seeks: self.seeks,
            reads: self.reads,
            cache_hits: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::RowParser;
    use crate::reader::RowSource;

    fn rows(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    fn parser() -> RowParser<Cursor<&'static str>> {
        RowParser::new(Cursor::new("1,2,3\n4,nan,6\n7,8,9\n"))
    }

    #[test]
    fn sequential_reads_do_not_seek() {
        let mut rp = parser();
        assert_eq!(rp.get_row(1).unwrap(), rows(&["1", "2", "3"]));
        assert_eq!(rp.get_row(2).unwrap(), rows(&["4", "nan", "6"]));
        assert_eq!(rp.get_row(3).unwrap(), rows(&["7", "8", "9"]));
        assert_eq!(rp.stats().seeks, 0);
        assert_eq!(rp.stats().reads, 3);
    }

    #[test]
    fn out_of_order_read_seeks_once() {
        let mut rp = parser();
        assert_eq!(rp.get_row(2).unwrap(), rows(&["4", "nan", "6"]));
        assert_eq!(rp.stats().seeks, 1);

        // Back to row 1, then continue sequentially.
        assert_eq!(rp.get_row(1).unwrap(), rows(&["1", "2", "3"]));
        assert_eq!(rp.get_row(2).unwrap(), rows(&["4", "nan", "6"]));
        assert_eq!(rp.stats().seeks, 2);
    }

    #[test]
    fn rereading_the_same_row_seeks() {
        let mut rp = parser();
        rp.get_row(1).unwrap();
        assert_eq!(rp.get_row(1).unwrap(), rows(&["1", "2", "3"]));
        assert_eq!(rp.stats().seeks, 1);
    }

    #[test]
    fn missing_row_is_end_of_input() {
        let mut rp = parser();
        assert!(rp.get_row(999).unwrap_err().is_end_of_input());
        assert!(rp.get_row(4).unwrap_err().is_end_of_input());
        assert!(rp.get_row(0).unwrap_err().is_end_of_input());
    }

    #[test]
    fn failed_read_still_moves_the_cursor() {
        let mut rp = RowParser::new(Cursor::new("1,2\n3,4"));
        rp.get_row(1).unwrap();
        rp.get_row(2).unwrap();
        assert!(rp.get_row(3).unwrap_err().is_end_of_input());
        assert_eq!(rp.last_row(), 3);

        // Row 4 counts as sequential after the failed row 3, so no seek happens.
        assert!(rp.get_row(4).unwrap_err().is_end_of_input());
        assert_eq!(rp.stats().seeks, 0);
    }

    #[test]
    fn largest_row_index_does_not_overflow_the_cursor() {
        let mut rp = parser();
        assert!(rp.get_row(u64::MAX).unwrap_err().is_end_of_input());
        assert_eq!(rp.get_row(1).unwrap(), rows(&["1", "2", "3"]));
        assert_eq!(rp.stats().seeks, 1);
    }

    #[test]
    fn custom_delimiter() {
        let mut rp = RowParser::with_delimiter(Cursor::new("1;2\n3;4\n"), b';');
        assert_eq!(rp.get_row(2).unwrap(), rows(&["3", "4"]));
    }

    #[test]
    fn unequal_field_count_is_a_csv_error() {
        let mut rp = RowParser::new(Cursor::new("1,2,3\n4,5\n"));
        rp.get_row(1).unwrap();
        let err = rp.get_row(2).unwrap_err();
        assert!(err.to_string().contains("csv error"));
    }
}
