//! Matrix format settings and per-run options.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{InterpolationError, InterpolationResult};

use super::observability::{InterpolationObserver, InterpolationSeverity};

/// Number of rows in an interpolation window (prior, current, next).
pub const WINDOW_ROWS: usize = 3;

/// Shape of the delimited input and of the interpolated output.
///
/// Every field has a default, so a JSON document only needs the settings it changes:
///
/// ```rust
/// use matrix_interpolate::interpolation::MatrixFormat;
///
/// let format = MatrixFormat::from_json_str(r#"{ "decimal_places": 2, "delimiter": ";" }"#).unwrap();
/// assert_eq!(format.decimal_places, 2);
/// assert_eq!(format.hole_marker, "nan");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixFormat {
    /// Single-byte field delimiter, used for both reading and writing.
    pub delimiter: char,
    /// Token marking a missing value. Unparseable tokens are treated the same way.
    pub hole_marker: String,
    /// Fractional digits used when formatting interpolated values.
    pub decimal_places: usize,
    /// Capacity of the row cache backing the window.
    pub window_cache_rows: usize,
}

impl Default for MatrixFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            hole_marker: "nan".to_string(),
            decimal_places: 6,
            window_cache_rows: WINDOW_ROWS,
        }
    }
}

impl MatrixFormat {
    /// Decode a format from JSON, then [`validate`](Self::validate) it.
    pub fn from_json_str(json: &str) -> InterpolationResult<Self> {
        let format: Self = serde_json::from_str(json)?;
        format.validate()?;
        Ok(format)
    }

    /// Checks settings that the readers cannot work with.
    pub fn validate(&self) -> InterpolationResult<()> {
        self.delimiter_byte()?;
        if self.window_cache_rows == 0 {
            return Err(InterpolationError::invalid_configuration(
                "window_cache_rows must be at least 1",
            ));
        }
        if self.hole_marker.is_empty() {
            return Err(InterpolationError::invalid_configuration(
                "hole_marker must not be empty",
            ));
        }
        Ok(())
    }

    /// The delimiter as the single byte the CSV reader and writer expect.
    pub fn delimiter_byte(&self) -> InterpolationResult<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                InterpolationError::invalid_configuration(format!(
                    "delimiter must be a single ASCII character (got {:?})",
                    self.delimiter
                ))
            })
    }
}

/// Options controlling a path-level interpolation run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct InterpolationOptions {
    /// Input/output format settings.
    pub format: MatrixFormat,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn InterpolationObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: InterpolationSeverity,
}

impl fmt::Debug for InterpolationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpolationOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for InterpolationOptions {
    fn default() -> Self {
        Self {
            format: MatrixFormat::default(),
            observer: None,
            alert_at_or_above: InterpolationSeverity::Critical,
        }
    }
}
