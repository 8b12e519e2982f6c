//! Row-random-access readers over a seekable delimited-text stream.
//!
//! Two implementations of [`RowSource`] are provided:
//!
//! - [`RowParser`]: reads rows straight from the stream, seeking only when a request is not
//!   the row right after the previous one
//! - [`CachedRowParser`]: wraps a [`RowParser`] with a small [`LruCache`] so rows requested
//!   again within a window are served without touching the stream
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use matrix_interpolate::reader::{CachedRowParser, RowSource};
//!
//! # fn main() -> Result<(), matrix_interpolate::InterpolationError> {
//! let data = Cursor::new("1,2\n3,nan\n5,6\n");
//! let mut rows = CachedRowParser::new(data, 3)?;
//!
//! let window = rows.get_rows(2, 3)?;
//! assert_eq!(window[0], Some(vec!["3".to_string(), "nan".to_string()]));
//! assert_eq!(window[2], None);
//! # Ok(())
//! # }
//! ```

mod cache;
mod cached;
mod line_index;
mod row_parser;

use std::fmt;

use crate::error::{InterpolationError, InterpolationResult};
use crate::types::{Row, RowIndex};

pub use cache::LruCache;
pub use cached::CachedRowParser;
pub use line_index::{LineIndex, DEFAULT_MAX_CHECKPOINTS};
pub use row_parser::RowParser;

/// Counters describing how a reader has touched its stream.
///
/// These are instrumentation only; no reader decision depends on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    /// Number of times the stream was repositioned to a line start.
    pub seeks: u64,
    /// Number of row requests that had to go to the stream (including failed ones).
    pub reads: u64,
    /// Number of requests served from a cache.
    pub cache_hits: u64,
}

impl fmt::Display for ReaderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seeks={}, reads={}, cache_hits={}",
            self.seeks, self.reads, self.cache_hits
        )
    }
}

/// Capability shared by the plain and caching readers.
pub trait RowSource {
    /// Returns the fields of row `index` (1-indexed).
    ///
    /// Fails with [`crate::InterpolationError::EndOfInput`] if the row does not exist.
    fn get_row(&mut self, index: RowIndex) -> InterpolationResult<Row>;

    /// Returns `count` consecutive rows starting at `first`, via repeated [`Self::get_row`].
    ///
    /// - If `first` does not exist, fails with [`crate::InterpolationError::EndOfInput`].
    /// - If a later row does not exist (or its index would overflow), the remaining slots are
    ///   `None` and no error is returned.
    /// - Any other error is returned as-is, whichever row it came from.
    fn get_rows(&mut self, first: RowIndex, count: usize) -> InterpolationResult<Vec<Option<Row>>> {
        let mut rows = vec![None; count];
        for (offset, slot) in rows.iter_mut().enumerate() {
            let index = first
                .checked_add(offset as RowIndex)
                .ok_or(InterpolationError::EndOfInput);
            match index.and_then(|i| self.get_row(i)) {
                Ok(row) => *slot = Some(row),
                Err(e) if offset > 0 && e.is_end_of_input() => break,
                Err(e) => return Err(e),
            }
        }
        Ok(rows)
    }

    /// Snapshot of the reader's instrumentation counters.
    fn stats(&self) -> ReaderStats;
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn get_row(&mut self, index: RowIndex) -> InterpolationResult<Row> {
        (**self).get_row(index)
    }

    fn get_rows(&mut self, first: RowIndex, count: usize) -> InterpolationResult<Vec<Option<Row>>> {
        (**self).get_rows(first, count)
    }

    fn stats(&self) -> ReaderStats {
        (**self).stats()
    }
}
