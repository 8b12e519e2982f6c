//! Byte offsets of line starts, discovered lazily and kept in bounded memory.

use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

use crate::types::RowIndex;

/// Default upper bound on stored checkpoints (8 KiB of offsets).
pub const DEFAULT_MAX_CHECKPOINTS: usize = 1024;

/// Finds the byte offset where a 1-indexed line starts.
///
/// Only every `stride`-th line start is kept as a checkpoint, plus the furthest line start
/// scanned so far. When the checkpoint list outgrows its limit, every other checkpoint is
/// dropped and the stride doubles, so memory stays bounded however long the input is.
/// Seeking back costs a forward scan of at most `stride` lines from the nearest checkpoint.
#[derive(Debug, Clone)]
pub struct LineIndex {
    // checkpoints[k] is the offset of line 1 + k * stride.
    checkpoints: Vec<u64>,
    stride: u64,
    max_checkpoints: usize,
    furthest: (RowIndex, u64),
    // Highest existing line number, once a scan has hit end-of-data.
    last_line: Option<RowIndex>,
}

impl LineIndex {
    pub fn new() -> Self {
        Self::with_max_checkpoints(DEFAULT_MAX_CHECKPOINTS)
    }

    /// Create an index storing at most `max_checkpoints` offsets (clamped to at least 2).
    pub fn with_max_checkpoints(max_checkpoints: usize) -> Self {
        Self {
            checkpoints: vec![0],
            stride: 1,
            max_checkpoints: max_checkpoints.max(2),
            furthest: (1, 0),
            last_line: None,
        }
    }

    /// Number of line offsets currently held.
    pub fn checkpoints(&self) -> usize {
        self.checkpoints.len()
    }

    /// Lines between consecutive checkpoints.
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Furthest line whose start has been seen.
    pub fn furthest_line(&self) -> RowIndex {
        self.furthest.0
    }

    /// Returns `true` once a scan has reached the end of the stream.
    pub fn is_complete(&self) -> bool {
        self.last_line.is_some()
    }

    /// Returns the byte offset of the first byte of `line`, scanning `stream` as needed.
    ///
    /// Returns `None` if the stream ends before `line` starts. The stream position is
    /// unspecified afterwards; callers seek to the returned offset themselves.
    ///
    /// A trailing newline yields a line start at end-of-data; reading from there reports
    /// end-of-input, so no special case is needed here.
    pub fn line_start<R: Read + Seek>(&mut self, stream: &mut R, line: RowIndex) -> io::Result<Option<u64>> {
        if line == 0 || self.last_line.is_some_and(|last| line > last) {
            return Ok(None);
        }

        let (from_line, from_offset) = if line >= self.furthest.0 {
            self.furthest
        } else {
            let k = (line - 1) / self.stride;
            match self.checkpoints.get(k as usize) {
                Some(&offset) => (1 + k * self.stride, offset),
                None => (1, 0),
            }
        };

        if from_line == line {
            return Ok(Some(from_offset));
        }
        self.scan(stream, from_line, from_offset, line)
    }

    fn scan<R: Read + Seek>(
        &mut self,
        stream: &mut R,
        from_line: RowIndex,
        from_offset: u64,
        target: RowIndex,
    ) -> io::Result<Option<u64>> {
        stream.seek(SeekFrom::Start(from_offset))?;
        let mut buf = BufReader::new(stream);
        let (mut line, mut pos) = (from_line, from_offset);

        while line < target {
            let chunk = buf.fill_buf()?;
            if chunk.is_empty() {
                self.last_line = Some(line);
                return Ok(None);
            }

            let mut consumed = chunk.len();
            for (i, &b) in chunk.iter().enumerate() {
                if b == b'\n' {
                    line += 1;
                    self.observe(line, pos + i as u64 + 1);
                    if line == target {
                        consumed = i + 1;
                        break;
                    }
                }
            }
            pos += consumed as u64;
            buf.consume(consumed);
        }
        Ok(Some(pos))
    }

    fn observe(&mut self, line: RowIndex, offset: u64) {
        if line <= self.furthest.0 {
            return;
        }
        self.furthest = (line, offset);

        if line - 1 == self.checkpoints.len() as u64 * self.stride {
            self.checkpoints.push(offset);
            if self.checkpoints.len() > self.max_checkpoints {
                // Keep lines 1, 1 + 2s, 1 + 4s, ... and double the stride.
                let mut k = 0;
                self.checkpoints.retain(|_| {
                    k += 1;
                    k % 2 == 1
                });
                self.stride *= 2;
            }
        }
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
