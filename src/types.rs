//! Core data model types shared by the readers and the interpolator.
//!
//! Rows are kept as raw field strings: cells that are not holes are passed through
//! byte-for-byte, so nothing is parsed into numbers until a hole needs its neighbors.

/// 1-indexed row (line) number within the matrix.
pub type RowIndex = u64;

/// One parsed matrix row: the ordered field strings of a single line.
///
/// An absent row (matrix boundary or past end-of-data) is modelled as `Option<Row>::None`.
pub type Row = Vec<String>;

/// The three-row context used to fill the holes of `current`.
///
/// `prior` and `next` are `None` at the top and bottom of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    /// Row above `current`, if any.
    pub prior: Option<&'a [String]>,
    /// Row being interpolated.
    pub current: &'a [String],
    /// Row below `current`, if any.
    pub next: Option<&'a [String]>,
}

impl<'a> Window<'a> {
    /// Create a window from borrowed rows.
    pub fn new(prior: Option<&'a [String]>, current: &'a [String], next: Option<&'a [String]>) -> Self {
        Self {
            prior,
            current,
            next,
        }
    }

    /// Number of columns in the current row.
    pub fn width(&self) -> usize {
        self.current.len()
    }
}
