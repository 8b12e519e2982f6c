//! `matrix-interpolate` fills missing values ("holes") in numeric matrices stored as delimited
//! text, without loading the matrix into memory.
//!
//! Rows are streamed through a three-row window (prior, current, next). Each hole in the
//! current row is replaced by the mean of its numeric neighbors above, below, left and right.
//!
//! ## Input format
//!
//! - One matrix row per line, fields separated by a single delimiter (`,` by default).
//! - All rows have the same number of fields.
//! - A missing value is the token `nan` (configurable); any other token that does not parse
//!   as a floating point number is treated as a hole too.
//!
//! Cells that are not holes are written back byte-for-byte. Filled cells are written with a
//! fixed number of fractional digits (6 by default).
//!
//! ## Quick example
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use matrix_interpolate::interpolation::StreamingInterpolator;
//!
//! # fn main() -> Result<(), matrix_interpolate::InterpolationError> {
//! let data = Cursor::new("2.23,3.34,4.45\n8.89,nan,10\n5.56,6.67,7.78\n");
//! let mut rows = StreamingInterpolator::new(data, 2)?;
//!
//! assert_eq!(rows.next_row()?, vec!["2.23", "3.34", "4.45"]);
//! assert_eq!(rows.next_row()?, vec!["8.89", "7.22", "10"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`reader`]: seek-minimizing, optionally cached row access over a seekable stream
//! - [`interpolation`]: the window function, the streaming driver and path-level entry points
//! - [`types`]: rows and windows
//! - [`error`]: error types shared by every layer

pub mod error;
pub mod interpolation;
pub mod reader;
pub mod types;

pub use error::{InterpolationError, InterpolationResult};
