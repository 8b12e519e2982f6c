//! Row reader that serves repeated window requests from a small LRU cache.

use std::io::{Read, Seek};

use crate::error::InterpolationResult;
use crate::types::{Row, RowIndex};

use super::{LruCache, ReaderStats, RowParser, RowSource};

/// A [`RowParser`] that remembers the last `capacity` rows it returned.
///
/// Cache hits never touch the stream. Misses go through the wrapped parser, so its
/// sequential-read optimization still applies to them.
pub struct CachedRowParser<R> {
    inner: RowParser<R>,
    cache: LruCache<RowIndex, Row>,
    hits: u64,
}

impl<R: Read + Seek> CachedRowParser<R> {
    /// Create a comma-delimited caching parser over `data`.
    ///
    /// Fails with [`crate::InterpolationError::InvalidConfiguration`] if `capacity` is 0.
    pub fn new(data: R, capacity: usize) -> InterpolationResult<Self> {
        Self::from_parser(RowParser::new(data), capacity)
    }

    /// Wrap an existing parser.
    pub fn from_parser(inner: RowParser<R>, capacity: usize) -> InterpolationResult<Self> {
        Ok(Self {
            inner,
            cache: LruCache::new(capacity)?,
            hits: 0,
        })
    }

    /// Returns `true` if row `index` would be served from the cache.
    pub fn is_cached(&self, index: RowIndex) -> bool {
        self.cache.contains(&index)
    }

    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }
}

impl<R: Read + Seek> RowSource for CachedRowParser<R> {
    fn get_row(&mut self, index: RowIndex) -> InterpolationResult<Row> {
        if let Some(row) = self.cache.get(&index) {
            self.hits += 1;
            return Ok(row.clone());
        }

        let row = self.inner.get_row(index)?;
        self.cache.put(index, row.clone());
        Ok(row)
    }

    fn stats(&self) -> ReaderStats {
        ReaderStats {
            cache_hits: self.hits,
            ..self.inner.stats()
        }
    }
}
