//! Hole filling over three-row windows.
//!
//! - [`interpolate_window`]: pure function filling the holes of one row from its window
//! - [`StreamingInterpolator`]: walks a whole matrix, assembling windows at the edges
//! - [`interpolate_from_path`] / [`interpolate_to_writer`]: stream a file to an output sink,
//!   optionally reporting to an [`InterpolationObserver`]

mod observability;
mod options;
mod stream;
mod unified;
mod window;

pub use observability::{
    InterpolationObserver, InterpolationSeverity, InterpolationStats, LineLogObserver, RunFailure,
};
pub use options::{InterpolationOptions, MatrixFormat, WINDOW_ROWS};
pub use stream::StreamingInterpolator;
pub use unified::{interpolate_from_path, interpolate_to_writer};
pub use window::{interpolate_window, is_hole, parse_cell};
