//! Forward-only interpolation over a whole matrix, one row at a time.

use std::io::{Read, Seek};

use crate::error::{InterpolationError, InterpolationResult};
use crate::reader::{CachedRowParser, ReaderStats, RowParser, RowSource};
use crate::types::{Row, RowIndex, Window};

use super::options::{MatrixFormat, WINDOW_ROWS};
use super::window::interpolate_window;

/// Streams hole-filled rows out of a [`RowSource`].
///
/// Each call to [`next_row`](Self::next_row) fetches the window around the next row (rows
/// `r - 1`, `r`, `r + 1`; just `1` and `2` for the first row) and fills its holes. Only the
/// window's rows are ever held in memory.
///
/// The sequence ends with [`InterpolationError::EndOfInput`]. Any error, including that
/// one, is terminal: later calls return `EndOfInput` without touching the source.
///
/// ```rust
/// use std::io::Cursor;
///
/// use matrix_interpolate::interpolation::StreamingInterpolator;
///
/// # fn main() -> Result<(), matrix_interpolate::InterpolationError> {
/// let data = Cursor::new("1,2\nnan,4\n5,6\n");
/// let rows = StreamingInterpolator::new(data, 2)?.collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(rows[1], vec!["3.33".to_string(), "4".to_string()]);
/// # Ok(())
/// # }
/// ```
pub struct StreamingInterpolator<S> {
    source: S,
    hole_marker: String,
    decimal_places: usize,
    row: RowIndex,
    finished: bool,
}

impl<R: Read + Seek> StreamingInterpolator<CachedRowParser<R>> {
    /// Interpolate comma-delimited `data`, formatting filled values with `decimal_places`
    /// fractional digits.
    pub fn new(data: R, decimal_places: usize) -> InterpolationResult<Self> {
        let format = MatrixFormat {
            decimal_places,
            ..Default::default()
        };
        Self::with_format(data, &format)
    }

    /// Interpolate `data` as described by `format`.
    ///
    /// Fails with [`InterpolationError::InvalidConfiguration`] if the format is unusable
    /// (e.g. a zero-row cache).
    pub fn with_format(data: R, format: &MatrixFormat) -> InterpolationResult<Self> {
        format.validate()?;
        let parser = RowParser::with_delimiter(data, format.delimiter_byte()?);
        let source = CachedRowParser::from_parser(parser, format.window_cache_rows)?;
        Ok(Self::from_source(source, format))
    }
}

impl<S: RowSource> StreamingInterpolator<S> {
    /// Drive the interpolator from any row source, e.g. an uncached [`RowParser`].
    pub fn from_source(source: S, format: &MatrixFormat) -> Self {
        Self {
            source,
            hole_marker: format.hole_marker.clone(),
            decimal_places: format.decimal_places,
            row: 0,
            finished: false,
        }
    }

    /// Returns the next row with its holes filled.
    pub fn next_row(&mut self) -> InterpolationResult<Row> {
        if self.finished {
            return Err(InterpolationError::EndOfInput);
        }

        let result = self.fill_next();
        if result.is_err() {
            self.finished = true;
        }
        result
    }

    /// Number of rows requested so far, including a final one that hit the end of input.
    pub fn position(&self) -> RowIndex {
        self.row
    }

    /// Returns `true` once the stream has ended or failed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Instrumentation counters of the underlying source.
    pub fn stats(&self) -> ReaderStats {
        self.source.stats()
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn fill_next(&mut self) -> InterpolationResult<Row> {
        self.row += 1;
        let rows = self.fetch_window(self.row)?;

        let Some(current) = rows.get(1).and_then(Option::as_deref) else {
            return Err(InterpolationError::EndOfInput);
        };
        let prior = rows.first().and_then(Option::as_deref);
        let next = rows.get(2).and_then(Option::as_deref);

        let window = Window::new(prior, current, next);
        Ok(interpolate_window(&window, &self.hole_marker, self.decimal_places))
    }

    fn fetch_window(&mut self, row: RowIndex) -> InterpolationResult<Vec<Option<Row>>> {
        if row == 1 {
            // No row 0: only the current and next rows exist.
            let mut rows = Vec::with_capacity(WINDOW_ROWS);
            rows.push(None);
            rows.extend(self.source.get_rows(1, WINDOW_ROWS - 1)?);
            Ok(rows)
        } else {
            self.source.get_rows(row - 1, WINDOW_ROWS)
        }
    }
}

impl<S: RowSource> Iterator for StreamingInterpolator<S> {
    type Item = InterpolationResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_row() {
            Err(e) if e.is_end_of_input() => None,
            other => Some(other),
        }
    }
}
