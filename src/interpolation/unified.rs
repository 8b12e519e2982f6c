//! Path-level entry points.
//!
//! Most callers should use [`interpolate_from_path`], which streams an input file through a
//! [`StreamingInterpolator`] and writes every filled row to an output sink.
//!
//! - Output fields are joined with the input delimiter, one row per line.
//! - If an [`super::observability::InterpolationObserver`] is provided, it hears how the run
//!   ended: the final stats, or the error with the row it stopped at.

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::error::{InterpolationError, InterpolationResult};
use crate::reader::RowSource;
use crate::types::RowIndex;

use super::observability::{InterpolationSeverity, InterpolationStats, RunFailure};
use super::options::{InterpolationOptions, MatrixFormat};
use super::stream::StreamingInterpolator;

/// Interpolates every row of `data` and writes it to `out`.
///
/// Stops at the first fatal error; rows already written stay written.
///
/// ```rust
/// use std::io::Cursor;
///
/// use matrix_interpolate::interpolation::{interpolate_to_writer, MatrixFormat};
///
/// # fn main() -> Result<(), matrix_interpolate::InterpolationError> {
/// let format = MatrixFormat {
///     decimal_places: 1,
///     ..Default::default()
/// };
/// let mut out = Vec::new();
/// let stats = interpolate_to_writer(Cursor::new("1,nan,3\n"), &mut out, &format)?;
///
/// assert_eq!(stats.rows, 1);
/// assert_eq!(String::from_utf8(out).unwrap(), "1,2.0,3\n");
/// # Ok(())
/// # }
/// ```
pub fn interpolate_to_writer<R, W>(data: R, out: W, format: &MatrixFormat) -> InterpolationResult<InterpolationStats>
where
    R: Read + Seek,
    W: Write,
{
    let mut progress = Progress::default();
    stream_to_writer(data, out, format, &mut progress)?;
    Ok(progress.stats)
}

/// Interpolates the file at `path` into `out`.
///
/// When an observer is configured, this function reports:
///
/// - `on_finished` once the whole file has been written, with row and reader stats
/// - `on_aborted` on failure, with a computed severity, the row being produced and the
///   progress up to that point
/// - `on_alert` after `on_aborted` when the severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use std::sync::Arc;
///
/// use matrix_interpolate::interpolation::{interpolate_from_path, InterpolationOptions, LineLogObserver};
///
/// # fn main() -> Result<(), matrix_interpolate::InterpolationError> {
/// let opts = InterpolationOptions {
///     observer: Some(Arc::new(LineLogObserver::stderr())),
///     ..Default::default()
/// };
/// let stats = interpolate_from_path("matrix.csv", std::io::stdout().lock(), &opts)?;
/// eprintln!("{stats}");
/// # Ok(())
/// # }
/// ```
pub fn interpolate_from_path<W: Write>(
    path: impl AsRef<Path>,
    out: W,
    options: &InterpolationOptions,
) -> InterpolationResult<InterpolationStats> {
    let path = path.as_ref();
    let mut progress = Progress::default();

    let result = File::open(path)
        .map_err(InterpolationError::from)
        .and_then(|file| stream_to_writer(file, out, &options.format, &mut progress));

    if let Some(obs) = options.observer.as_deref() {
        match &result {
            Ok(()) => obs.on_finished(path, &progress.stats),
            Err(error) => {
                let failure = RunFailure {
                    severity: InterpolationSeverity::for_error(error),
                    error,
                    row: progress.stopped_at,
                    progress: progress.stats,
                };
                obs.on_aborted(path, &failure);
                if failure.severity >= options.alert_at_or_above {
                    obs.on_alert(path, &failure);
                }
            }
        }
    }

    result.map(|()| progress.stats)
}

#[derive(Debug, Default)]
struct Progress {
    stats: InterpolationStats,
    // Row being produced when streaming failed.
    stopped_at: Option<RowIndex>,
}

fn stream_to_writer<R, W>(data: R, out: W, format: &MatrixFormat, progress: &mut Progress) -> InterpolationResult<()>
where
    R: Read + Seek,
    W: Write,
{
    let mut rows = StreamingInterpolator::with_format(data, format)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(format.delimiter_byte()?)
        .from_writer(out);

    let result = write_rows(&mut rows, &mut writer, &mut progress.stats.rows);
    progress.stats.reader = rows.stats();
    if result.is_err() {
        progress.stopped_at = Some(rows.position());
    }
    result
}

fn write_rows<S, W>(
    rows: &mut StreamingInterpolator<S>,
    writer: &mut csv::Writer<W>,
    written: &mut u64,
) -> InterpolationResult<()>
where
    S: RowSource,
    W: Write,
{
    for row in rows.by_ref() {
        writer.write_record(&row?)?;
        *written += 1;
    }
    writer.flush()?;
    Ok(())
}
